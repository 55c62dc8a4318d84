//! Chat history HTTP handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use mindmate_core::defaults::{CHAT_PAGE_LIMIT, PAGE_OFFSET};
use mindmate_core::{ChatHistoryRepository, Pagination};

use crate::middleware::auth::AuthUser;
use crate::{ApiError, AppState};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for saving an exchange directly.
#[derive(Debug, Deserialize)]
pub struct CreateChatBody {
    pub message: Option<String>,
    pub response: Option<String>,
}

/// Query parameters for history listing.
#[derive(Debug, Default, Deserialize)]
pub struct ChatListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Persist one message/response exchange.
pub async fn create_chat_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateChatBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let (Some(message), Some(response)) = (body.message, body.response) else {
        return Err(ApiError::BadRequest(
            "Message and response are required".to_string(),
        ));
    };
    if message.is_empty() || response.is_empty() {
        return Err(ApiError::BadRequest(
            "Message and response are required".to_string(),
        ));
    }

    let entry = state.db.chat.insert(user_id, &message, &response).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "chatHistory": entry })),
    ))
}

/// List the caller's history, newest first, with pagination metadata.
pub async fn get_chat_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ChatListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let limit = query.limit.unwrap_or(CHAT_PAGE_LIMIT).max(0);
    let offset = query.offset.unwrap_or(PAGE_OFFSET).max(0);

    let page = state.db.chat.list(user_id, limit, offset).await?;

    Ok(Json(serde_json::json!({
        "chatHistory": page.messages,
        "pagination": Pagination::new(page.total, limit, offset),
    })))
}

/// Delete one message.
pub async fn delete_chat_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.db.chat.delete(user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Chat message not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Chat message deleted successfully"
    })))
}

/// Delete the caller's entire history, reporting the count removed.
pub async fn clear_chat_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted_count = state.db.chat.clear(user_id).await?;

    Ok(Json(serde_json::json!({
        "message": "Chat history cleared successfully",
        "deletedCount": deleted_count,
    })))
}
