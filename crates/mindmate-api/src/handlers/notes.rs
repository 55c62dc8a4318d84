//! Note HTTP handlers.
//!
//! Notes have no user id of their own; every operation here goes through the
//! note repository's transitive ownership scoping (note → folder → user).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use mindmate_core::{FolderRepository, NoteRepository, UpdateNoteRequest};

use crate::middleware::auth::AuthUser;
use crate::{ApiError, AppState};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
pub struct CreateNoteBody {
    #[serde(rename = "folderId")]
    pub folder_id: Option<Uuid>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for updating a note. Explicit nulls clear `title`/`content`;
/// absent fields are left unchanged. A null `folderId` keeps the note where
/// it is.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteBody {
    #[serde(default)]
    pub title: Option<Option<String>>,
    #[serde(default)]
    pub content: Option<Option<String>>,
    #[serde(rename = "folderId", default)]
    pub folder_id: Option<Uuid>,
}

/// Query parameters for note listing.
#[derive(Debug, Default, Deserialize)]
pub struct NoteListQuery {
    #[serde(rename = "folderId")]
    pub folder_id: Option<Uuid>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Create a note in a folder the caller owns.
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateNoteBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let folder_id = body
        .folder_id
        .ok_or_else(|| ApiError::BadRequest("Folder ID is required".to_string()))?;

    state
        .db
        .folders
        .find_owned(user_id, folder_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Folder not found".to_string()))?;

    let title = body
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Untitled Note".to_string());
    let content = body.content.unwrap_or_default();

    let note = state.db.notes.create(folder_id, &title, &content).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "note": note })),
    ))
}

/// List notes — in one folder (with artifact references) or across all the
/// caller's folders.
pub async fn get_notes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<NoteListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(folder_id) = query.folder_id {
        state
            .db
            .folders
            .find_owned(user_id, folder_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Folder not found".to_string()))?;
    }

    let notes = state.db.notes.list(user_id, query.folder_id).await?;
    Ok(Json(serde_json::json!({ "notes": notes })))
}

/// Fetch one note with its full summary and quiz history.
pub async fn get_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let note = state
        .db
        .notes
        .get(user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(serde_json::json!({ "note": note })))
}

/// Partially update a note; moving it requires owning the target folder.
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoteBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .notes
        .find_owned(user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    if let Some(folder_id) = body.folder_id {
        state
            .db
            .folders
            .find_owned(user_id, folder_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Target folder not found".to_string()))?;
    }

    let note = state
        .db
        .notes
        .update(
            user_id,
            id,
            UpdateNoteRequest {
                title: body.title,
                content: body.content,
                folder_id: body.folder_id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(serde_json::json!({ "note": note })))
}

/// Delete a note; its summaries and quizzes cascade.
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.db.notes.delete(user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Note deleted successfully"
    })))
}
