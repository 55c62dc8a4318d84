//! Chat history repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use mindmate_core::{
    new_v7, ChatHistoryRepository, ChatMessage, ChatPage, Error, Result,
};

/// PostgreSQL implementation of ChatHistoryRepository.
pub struct PgChatHistoryRepository {
    pool: Pool<Postgres>,
}

impl PgChatHistoryRepository {
    /// Create a new PgChatHistoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_chat_row(row: &sqlx::postgres::PgRow) -> ChatMessage {
    ChatMessage {
        id: row.get("id"),
        user_id: row.get("user_id"),
        message: row.get("message"),
        response: row.get("response"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl ChatHistoryRepository for PgChatHistoryRepository {
    async fn insert(&self, user_id: Uuid, message: &str, response: &str) -> Result<ChatMessage> {
        let id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO chat_history (id, user_id, message, response, created_at_utc)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(user_id)
        .bind(message)
        .bind(response)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(ChatMessage {
            id,
            user_id,
            message: message.to_string(),
            response: response.to_string(),
            created_at_utc: now,
        })
    }

    async fn list(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<ChatPage> {
        let rows = sqlx::query(
            "SELECT id, user_id, message, response, created_at_utc
             FROM chat_history
             WHERE user_id = $1
             ORDER BY created_at_utc DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM chat_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?
            .get("total");

        Ok(ChatPage {
            messages: rows.iter().map(map_chat_row).collect(),
            total,
        })
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM chat_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM chat_history WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected())
    }
}
