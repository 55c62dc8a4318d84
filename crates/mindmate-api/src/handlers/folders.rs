//! Folder HTTP handlers.
//!
//! Every lookup is scoped to the authenticated user; a folder that exists but
//! belongs to someone else yields the same 404 as one that never existed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use mindmate_core::{FolderRepository, UpdateFolderRequest};

use crate::middleware::auth::AuthUser;
use crate::{ApiError, AppState};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for creating a folder.
#[derive(Debug, Deserialize)]
pub struct CreateFolderBody {
    pub name: Option<String>,
    #[serde(rename = "parentId")]
    pub parent_id: Option<Uuid>,
}

/// Request body for updating a folder. `parentId: null` clears the parent;
/// an absent `parentId` leaves it unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFolderBody {
    pub name: Option<String>,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<Option<Uuid>>,
}

/// Query parameters for folder listing.
#[derive(Debug, Default, Deserialize)]
pub struct FolderListQuery {
    #[serde(rename = "parentId")]
    pub parent_id: Option<Uuid>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Create a folder, optionally under a parent the caller owns.
pub async fn create_folder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateFolderBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Folder name is required".to_string()))?;

    if let Some(parent_id) = body.parent_id {
        state
            .db
            .folders
            .find_owned(user_id, parent_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Parent folder not found".to_string()))?;
    }

    let folder = state
        .db
        .folders
        .create(user_id, name.trim(), body.parent_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "folder": folder })),
    ))
}

/// List the caller's folders under `parentId`, or top-level folders.
pub async fn get_folders(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<FolderListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folders = state.db.folders.list(user_id, query.parent_id).await?;
    Ok(Json(serde_json::json!({ "folders": folders })))
}

/// Fetch one folder with children, notes, and parent.
pub async fn get_folder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state
        .db
        .folders
        .get(user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Folder not found".to_string()))?;

    Ok(Json(serde_json::json!({ "folder": folder })))
}

/// Partially update a folder's name or parent.
pub async fn update_folder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateFolderBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .db
        .folders
        .find_owned(user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Folder not found".to_string()))?;

    if let Some(Some(parent_id)) = body.parent_id {
        if parent_id == id {
            return Err(ApiError::BadRequest(
                "Folder cannot be its own parent".to_string(),
            ));
        }
        state
            .db
            .folders
            .find_owned(user_id, parent_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Parent folder not found".to_string()))?;
    }

    let folder = state
        .db
        .folders
        .update(
            user_id,
            id,
            UpdateFolderRequest {
                name: body.name.filter(|n| !n.trim().is_empty()),
                parent_id: body.parent_id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Folder not found".to_string()))?;

    Ok(Json(serde_json::json!({ "folder": folder })))
}

/// Delete a folder; descendants and their artifacts cascade.
pub async fn delete_folder(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.db.folders.delete(user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Folder not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Folder deleted successfully"
    })))
}
