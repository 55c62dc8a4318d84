//! Core traits for mindmate abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. Every repository
//! method that reads, mutates, or deletes an existing resource takes the
//! authenticated user id and scopes the lookup by ownership; a scoped lookup
//! that matches nothing is indistinguishable from a missing resource.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Request for creating a new user account.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

/// Repository for account storage and credential lookup.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. A duplicate email yields `Error::Conflict`.
    async fn create(&self, req: CreateUserRequest) -> Result<User>;

    /// Fetch a user by email, including the stored password hash.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Fetch the public projection of a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PublicUser>>;
}

// =============================================================================
// FOLDER REPOSITORY
// =============================================================================

/// Partial update for a folder. `parent_id` distinguishes "leave unchanged"
/// (None) from "set" (Some(Some(id))) and "clear to root" (Some(None)).
#[derive(Debug, Clone, Default)]
pub struct UpdateFolderRequest {
    pub name: Option<String>,
    pub parent_id: Option<Option<Uuid>>,
}

/// Repository for folder trees, scoped to their owning user.
#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Insert a folder and return it with (empty) children and notes.
    /// Parent ownership must be validated by the caller beforehand.
    async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> Result<FolderDetail>;

    /// Ownership-scoped lookup of a bare folder row.
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Folder>>;

    /// Fetch a folder with children, note references, and its parent.
    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<FolderDetail>>;

    /// List the user's folders under `parent_id`, or root folders when None.
    /// Newest first.
    async fn list(&self, user_id: Uuid, parent_id: Option<Uuid>) -> Result<Vec<FolderDetail>>;

    /// Apply a partial update. Returns None when the folder is not owned.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        req: UpdateFolderRequest,
    ) -> Result<Option<FolderDetail>>;

    /// Delete a folder. Descendant folders, notes, and artifacts are removed
    /// by storage-layer cascades. Returns false when the folder is not owned.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}

// =============================================================================
// NOTE REPOSITORY
// =============================================================================

/// Partial update for a note. Double options on `title`/`content` let an
/// explicit null clear the field; a null/absent `folder_id` leaves the note
/// where it is.
#[derive(Debug, Clone, Default)]
pub struct UpdateNoteRequest {
    pub title: Option<Option<String>>,
    pub content: Option<Option<String>>,
    pub folder_id: Option<Uuid>,
}

/// Repository for notes, ownership-scoped transitively through folders.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note into a folder. Folder ownership must be validated by the
    /// caller beforehand.
    async fn create(
        &self,
        folder_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Note>;

    /// Ownership-scoped lookup of a note row (via its folder's owner),
    /// without artifact history.
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> Result<Option<Note>>;

    /// Fetch a note with folder reference and full artifact history.
    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<NoteDetail>>;

    /// List notes in one folder (with artifact references) or across all the
    /// user's folders. Most recently updated first.
    async fn list(&self, user_id: Uuid, folder_id: Option<Uuid>) -> Result<Vec<Note>>;

    /// Apply a partial update. Target-folder ownership must be validated by
    /// the caller. Returns None when the note is not owned.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        req: UpdateNoteRequest,
    ) -> Result<Option<Note>>;

    /// Delete a note (artifacts cascade). Returns false when not owned.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}

// =============================================================================
// ARTIFACT REPOSITORY (summaries and quizzes)
// =============================================================================

/// Repository for generated summaries/quizzes, scoped through note→folder.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Append a generated artifact for a note. Note ownership must be
    /// validated by the caller beforehand.
    async fn insert(&self, note_id: Uuid, response: &str) -> Result<Artifact>;

    /// List artifacts for one note or across all the user's notes, newest
    /// first, each carrying its owning-note reference.
    async fn list(&self, user_id: Uuid, note_id: Option<Uuid>) -> Result<Vec<Artifact>>;

    /// Delete an artifact. Returns false when not owned.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool>;
}

// =============================================================================
// CHAT HISTORY REPOSITORY
// =============================================================================

/// One page of chat history plus the total row count for the user.
#[derive(Debug, Clone)]
pub struct ChatPage {
    pub messages: Vec<ChatMessage>,
    pub total: i64,
}

/// Repository for per-user chat history.
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// Persist one exchange.
    async fn insert(&self, user_id: Uuid, message: &str, response: &str) -> Result<ChatMessage>;

    /// List the user's history, newest first, with limit/offset pagination.
    async fn list(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<ChatPage>;

    /// Delete a single message. Returns false when not owned.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool>;

    /// Delete the user's entire history, returning the number removed.
    async fn clear(&self, user_id: Uuid) -> Result<u64>;
}

// =============================================================================
// AI BACKEND
// =============================================================================

/// Narrow interface over the external text-generation API.
///
/// Each operation is a stateless single request; failures surface as
/// `Error::Generation` and are never retried here.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Generate a concise summary of note content.
    async fn summarize(&self, content: &str, title: Option<&str>) -> Result<String>;

    /// Generate a multiple-choice quiz as a JSON document string.
    async fn quiz(&self, content: &str, title: Option<&str>) -> Result<String>;

    /// Generate a chat response, optionally grounded in note context.
    async fn chat(&self, message: &str, context: Option<&str>) -> Result<String>;
}
