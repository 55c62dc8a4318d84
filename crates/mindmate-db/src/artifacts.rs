//! Generated-artifact repository covering the summary and quiz tables.
//!
//! The two tables share an identical shape, so a single implementation is
//! parameterized by [`ArtifactKind`]; this keeps the ownership scoping for
//! summaries and quizzes from drifting apart. The table name is interpolated
//! from a fixed enum, never from input.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use mindmate_core::{
    new_v7, Artifact, ArtifactKind, ArtifactRepository, Error, NoteTitleRef, Result,
};

/// PostgreSQL implementation of ArtifactRepository for one artifact kind.
pub struct PgArtifactRepository {
    pool: Pool<Postgres>,
    kind: ArtifactKind,
}

impl PgArtifactRepository {
    /// Create a repository bound to one artifact table.
    pub fn new(pool: Pool<Postgres>, kind: ArtifactKind) -> Self {
        Self { pool, kind }
    }

    /// The artifact kind this repository operates on.
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }
}

fn map_artifact_row(row: &sqlx::postgres::PgRow) -> Artifact {
    Artifact {
        id: row.get("id"),
        note_id: row.get("note_id"),
        response: row.get("response"),
        created_at_utc: row.get("created_at_utc"),
        note: Some(NoteTitleRef {
            id: row.get("note_id"),
            title: row.get("note_title"),
        }),
    }
}

#[async_trait]
impl ArtifactRepository for PgArtifactRepository {
    async fn insert(&self, note_id: Uuid, response: &str) -> Result<Artifact> {
        let id = new_v7();
        let now = Utc::now();

        let sql = format!(
            "INSERT INTO {} (id, note_id, response, created_at_utc) VALUES ($1, $2, $3, $4)",
            self.kind.table()
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(note_id)
            .bind(response)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        let title_row = sqlx::query("SELECT title FROM note WHERE id = $1")
            .bind(note_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(Artifact {
            id,
            note_id,
            response: response.to_string(),
            created_at_utc: now,
            note: Some(NoteTitleRef {
                id: note_id,
                title: title_row.and_then(|r| r.get("title")),
            }),
        })
    }

    async fn list(&self, user_id: Uuid, note_id: Option<Uuid>) -> Result<Vec<Artifact>> {
        let rows = if let Some(nid) = note_id {
            let sql = format!(
                "SELECT a.id, a.note_id, a.response, a.created_at_utc, n.title AS note_title
                 FROM {} a
                 JOIN note n ON n.id = a.note_id
                 JOIN folder f ON f.id = n.folder_id
                 WHERE a.note_id = $1 AND f.user_id = $2
                 ORDER BY a.created_at_utc DESC",
                self.kind.table()
            );
            sqlx::query(&sql)
                .bind(nid)
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?
        } else {
            let sql = format!(
                "SELECT a.id, a.note_id, a.response, a.created_at_utc, n.title AS note_title
                 FROM {} a
                 JOIN note n ON n.id = a.note_id
                 JOIN folder f ON f.id = n.folder_id
                 WHERE f.user_id = $1
                 ORDER BY a.created_at_utc DESC",
                self.kind.table()
            );
            sqlx::query(&sql)
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(Error::Database)?
        };

        Ok(rows.iter().map(map_artifact_row).collect())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        let sql = format!(
            "DELETE FROM {} a
             USING note n, folder f
             WHERE a.id = $1 AND n.id = a.note_id AND f.id = n.folder_id AND f.user_id = $2",
            self.kind.table()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
