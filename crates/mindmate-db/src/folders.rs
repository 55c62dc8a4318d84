//! Folder repository implementation.
//!
//! Folders form a per-user tree via `parent_id`. Every query here filters by
//! the owning user id, so a folder belonging to someone else is
//! indistinguishable from one that does not exist.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use mindmate_core::{
    new_v7, Error, Folder, FolderDetail, FolderRepository, NoteRef, Result, UpdateFolderRequest,
};

/// PostgreSQL implementation of FolderRepository.
pub struct PgFolderRepository {
    pool: Pool<Postgres>,
}

impl PgFolderRepository {
    /// Create a new PgFolderRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Load direct children for a set of folders, grouped by parent id.
    async fn children_for(&self, user_id: Uuid, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Folder>>> {
        let rows = sqlx::query(
            "SELECT id, user_id, name, parent_id, created_at_utc
             FROM folder
             WHERE user_id = $1 AND parent_id = ANY($2)
             ORDER BY created_at_utc DESC",
        )
        .bind(user_id)
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut grouped: HashMap<Uuid, Vec<Folder>> = HashMap::new();
        for row in rows {
            let folder = map_folder_row(&row);
            let parent: Uuid = row.get("parent_id");
            grouped.entry(parent).or_default().push(folder);
        }
        Ok(grouped)
    }

    /// Load note references for a set of folders, grouped by folder id.
    async fn notes_for(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<NoteRef>>> {
        let rows = sqlx::query(
            "SELECT id, folder_id, title, created_at_utc, updated_at_utc
             FROM note
             WHERE folder_id = ANY($1)
             ORDER BY updated_at_utc DESC",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let mut grouped: HashMap<Uuid, Vec<NoteRef>> = HashMap::new();
        for row in rows {
            let folder_id: Uuid = row.get("folder_id");
            grouped.entry(folder_id).or_default().push(NoteRef {
                id: row.get("id"),
                title: row.get("title"),
                created_at_utc: row.get("created_at_utc"),
                updated_at_utc: row.get("updated_at_utc"),
            });
        }
        Ok(grouped)
    }

    /// Assemble details (children + note refs) for already-fetched folders.
    async fn assemble(&self, user_id: Uuid, folders: Vec<Folder>) -> Result<Vec<FolderDetail>> {
        if folders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = folders.iter().map(|f| f.id).collect();
        let mut children = self.children_for(user_id, &ids).await?;
        let mut notes = self.notes_for(&ids).await?;

        Ok(folders
            .into_iter()
            .map(|f| FolderDetail {
                children: children.remove(&f.id).unwrap_or_default(),
                notes: notes.remove(&f.id).unwrap_or_default(),
                parent: None,
                id: f.id,
                user_id: f.user_id,
                name: f.name,
                parent_id: f.parent_id,
                created_at_utc: f.created_at_utc,
            })
            .collect())
    }
}

fn map_folder_row(row: &sqlx::postgres::PgRow) -> Folder {
    Folder {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        parent_id: row.get("parent_id"),
        created_at_utc: row.get("created_at_utc"),
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<FolderDetail> {
        let id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO folder (id, user_id, name, parent_id, created_at_utc)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(parent_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(FolderDetail {
            id,
            user_id,
            name: name.to_string(),
            parent_id,
            created_at_utc: now,
            children: Vec::new(),
            notes: Vec::new(),
            parent: None,
        })
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Folder>> {
        let row = sqlx::query(
            "SELECT id, user_id, name, parent_id, created_at_utc
             FROM folder
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| map_folder_row(&r)))
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<FolderDetail>> {
        let Some(folder) = self.find_owned(user_id, id).await? else {
            return Ok(None);
        };

        let parent = match folder.parent_id {
            Some(pid) => self.find_owned(user_id, pid).await?,
            None => None,
        };

        let mut details = self.assemble(user_id, vec![folder]).await?;
        let mut detail = details.remove(0);
        detail.parent = parent;
        Ok(Some(detail))
    }

    async fn list(&self, user_id: Uuid, parent_id: Option<Uuid>) -> Result<Vec<FolderDetail>> {
        let rows = if let Some(pid) = parent_id {
            sqlx::query(
                "SELECT id, user_id, name, parent_id, created_at_utc
                 FROM folder
                 WHERE user_id = $1 AND parent_id = $2
                 ORDER BY created_at_utc DESC",
            )
            .bind(user_id)
            .bind(pid)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?
        } else {
            // Top-level folders (no parent)
            sqlx::query(
                "SELECT id, user_id, name, parent_id, created_at_utc
                 FROM folder
                 WHERE user_id = $1 AND parent_id IS NULL
                 ORDER BY created_at_utc DESC",
            )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?
        };

        let folders = rows.iter().map(map_folder_row).collect();
        self.assemble(user_id, folders).await
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        req: UpdateFolderRequest,
    ) -> Result<Option<FolderDetail>> {
        let Some(existing) = self.find_owned(user_id, id).await? else {
            return Ok(None);
        };

        let name = req.name.unwrap_or(existing.name);
        let parent_id = match req.parent_id {
            Some(new_parent) => new_parent,
            None => existing.parent_id,
        };

        sqlx::query("UPDATE folder SET name = $1, parent_id = $2 WHERE id = $3 AND user_id = $4")
            .bind(&name)
            .bind(parent_id)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        self.get(user_id, id).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool> {
        // Descendant folders, notes, and artifacts cascade at the storage layer.
        let result = sqlx::query("DELETE FROM folder WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(result.rows_affected() > 0)
    }
}
