//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use mindmate_core::{
    new_v7, CreateUserRequest, Error, PublicUser, Result, User, UserRepository,
};

/// PostgreSQL implementation of UserRepository.
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_user_row(row: sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        name: row.get("name"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, req: CreateUserRequest) -> Result<User> {
        let id = new_v7();
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO app_user (id, email, password_hash, name, created_at_utc)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&req.email)
        .bind(&req.password_hash)
        .bind(&req.name)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(User {
                id,
                email: req.email,
                password_hash: req.password_hash,
                name: req.name,
                created_at_utc: now,
            }),
            Err(e) => {
                let unique = e
                    .as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false);
                if unique {
                    Err(Error::Conflict(
                        "User already exists with this email".to_string(),
                    ))
                } else {
                    Err(Error::Database(e))
                }
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, name, created_at_utc
             FROM app_user
             WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(map_user_row))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PublicUser>> {
        let row = sqlx::query(
            "SELECT id, email, name, created_at_utc
             FROM app_user
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| PublicUser {
            id: r.get("id"),
            email: r.get("email"),
            name: r.get("name"),
            created_at_utc: r.get("created_at_utc"),
        }))
    }
}
