//! Note repository implementation.
//!
//! Notes carry no user id; ownership is always derived transitively by
//! joining through the owning folder. Queries that take a user id therefore
//! join `folder` and filter on `folder.user_id`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use mindmate_core::{
    new_v7, Artifact, ArtifactKind, ArtifactRef, Error, FolderRef, Note, NoteDetail,
    NoteRepository, Result, UpdateNoteRequest,
};

/// PostgreSQL implementation of NoteRepository.
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fetch a note joined with its folder, unscoped. Internal use only —
    /// callers must have already established ownership.
    async fn fetch_unscoped(&self, id: Uuid) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT n.id, n.folder_id, n.title, n.content,
                    n.created_at_utc, n.updated_at_utc, f.name AS folder_name
             FROM note n
             JOIN folder f ON f.id = n.folder_id
             WHERE n.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| map_note_row(&r)))
    }

    /// Load id + timestamp artifact references grouped by note id.
    async fn artifact_refs_for(
        &self,
        kind: ArtifactKind,
        note_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ArtifactRef>>> {
        let sql = format!(
            "SELECT id, note_id, created_at_utc FROM {} \
             WHERE note_id = ANY($1) ORDER BY created_at_utc DESC",
            kind.table()
        );

        let rows = sqlx::query(&sql)
            .bind(note_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        let mut grouped: HashMap<Uuid, Vec<ArtifactRef>> = HashMap::new();
        for row in rows {
            let note_id: Uuid = row.get("note_id");
            grouped.entry(note_id).or_default().push(ArtifactRef {
                id: row.get("id"),
                created_at_utc: row.get("created_at_utc"),
            });
        }
        Ok(grouped)
    }

    /// Load full artifact rows for one note, newest first.
    async fn artifacts_for_note(&self, kind: ArtifactKind, note_id: Uuid) -> Result<Vec<Artifact>> {
        let sql = format!(
            "SELECT id, note_id, response, created_at_utc FROM {} \
             WHERE note_id = $1 ORDER BY created_at_utc DESC",
            kind.table()
        );

        let rows = sqlx::query(&sql)
            .bind(note_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|row| Artifact {
                id: row.get("id"),
                note_id: row.get("note_id"),
                response: row.get("response"),
                created_at_utc: row.get("created_at_utc"),
                note: None,
            })
            .collect())
    }
}

fn map_note_row(row: &sqlx::postgres::PgRow) -> Note {
    Note {
        id: row.get("id"),
        folder_id: row.get("folder_id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at_utc: row.get("created_at_utc"),
        updated_at_utc: row.get("updated_at_utc"),
        folder: FolderRef {
            id: row.get("folder_id"),
            name: row.get("folder_name"),
        },
        summaries: None,
        quizzes: None,
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, folder_id: Uuid, title: &str, content: &str) -> Result<Note> {
        let id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO note (id, folder_id, title, content, created_at_utc, updated_at_utc)
             VALUES ($1, $2, $3, $4, $5, $5)",
        )
        .bind(id)
        .bind(folder_id)
        .bind(title)
        .bind(content)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        self.fetch_unscoped(id)
            .await?
            .ok_or_else(|| Error::NoteNotFound(id))
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Note>> {
        let row = sqlx::query(
            "SELECT n.id, n.folder_id, n.title, n.content,
                    n.created_at_utc, n.updated_at_utc, f.name AS folder_name
             FROM note n
             JOIN folder f ON f.id = n.folder_id
             WHERE n.id = $1 AND f.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| map_note_row(&r)))
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<NoteDetail>> {
        let Some(note) = self.find_owned(user_id, id).await? else {
            return Ok(None);
        };

        let summaries = self.artifacts_for_note(ArtifactKind::Summary, id).await?;
        let quizzes = self.artifacts_for_note(ArtifactKind::Quiz, id).await?;

        Ok(Some(NoteDetail {
            id: note.id,
            folder_id: note.folder_id,
            title: note.title,
            content: note.content,
            created_at_utc: note.created_at_utc,
            updated_at_utc: note.updated_at_utc,
            folder: note.folder,
            summaries,
            quizzes,
        }))
    }

    async fn list(&self, user_id: Uuid, folder_id: Option<Uuid>) -> Result<Vec<Note>> {
        if let Some(fid) = folder_id {
            let rows = sqlx::query(
                "SELECT n.id, n.folder_id, n.title, n.content,
                        n.created_at_utc, n.updated_at_utc, f.name AS folder_name
                 FROM note n
                 JOIN folder f ON f.id = n.folder_id
                 WHERE n.folder_id = $1 AND f.user_id = $2
                 ORDER BY n.updated_at_utc DESC",
            )
            .bind(fid)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

            let mut notes: Vec<Note> = rows.iter().map(map_note_row).collect();
            let ids: Vec<Uuid> = notes.iter().map(|n| n.id).collect();

            let mut summaries = self.artifact_refs_for(ArtifactKind::Summary, &ids).await?;
            let mut quizzes = self.artifact_refs_for(ArtifactKind::Quiz, &ids).await?;
            for note in &mut notes {
                note.summaries = Some(summaries.remove(&note.id).unwrap_or_default());
                note.quizzes = Some(quizzes.remove(&note.id).unwrap_or_default());
            }
            return Ok(notes);
        }

        let rows = sqlx::query(
            "SELECT n.id, n.folder_id, n.title, n.content,
                    n.created_at_utc, n.updated_at_utc, f.name AS folder_name
             FROM note n
             JOIN folder f ON f.id = n.folder_id
             WHERE f.user_id = $1
             ORDER BY n.updated_at_utc DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(map_note_row).collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        req: UpdateNoteRequest,
    ) -> Result<Option<Note>> {
        let Some(existing) = self.find_owned(user_id, id).await? else {
            return Ok(None);
        };

        let title = match req.title {
            Some(new_title) => new_title,
            None => existing.title,
        };
        let content = match req.content {
            Some(new_content) => new_content,
            None => existing.content,
        };
        let folder_id = req.folder_id.unwrap_or(existing.folder_id);
        let now = Utc::now();

        sqlx::query(
            "UPDATE note SET title = $1, content = $2, folder_id = $3, updated_at_utc = $4
             WHERE id = $5",
        )
        .bind(&title)
        .bind(&content)
        .bind(folder_id)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        self.find_owned(user_id, id).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        // Summaries and quizzes cascade at the storage layer.
        let result = sqlx::query(
            "DELETE FROM note n
             USING folder f
             WHERE n.id = $1 AND n.folder_id = f.id AND f.user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
