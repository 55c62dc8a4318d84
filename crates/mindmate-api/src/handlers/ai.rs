//! AI generation HTTP handlers: summaries, quizzes, and assistant chat.
//!
//! Each generation call is a single blocking pass-through to the AI backend.
//! Nothing is persisted until the external call succeeds and, for quizzes,
//! the response validates as a quiz JSON document.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use mindmate_ai::{parse_quiz_payload, prompts::note_context};
use mindmate_core::{
    ArtifactRepository, ChatHistoryRepository, Error, Note, NoteRepository,
};

use crate::middleware::auth::AuthUser;
use crate::{ApiError, AppState};

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for summary/quiz generation.
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    #[serde(rename = "noteId")]
    pub note_id: Option<Uuid>,
}

/// Request body for assistant chat.
#[derive(Debug, Deserialize)]
pub struct AiChatBody {
    pub message: Option<String>,
    #[serde(rename = "noteId")]
    pub note_id: Option<Uuid>,
}

/// Query parameters for artifact listing.
#[derive(Debug, Default, Deserialize)]
pub struct ArtifactListQuery {
    #[serde(rename = "noteId")]
    pub note_id: Option<Uuid>,
}

/// Resolve the target note and reject empty content before any AI call.
async fn require_note_with_content(
    state: &AppState,
    user_id: Uuid,
    note_id: Option<Uuid>,
) -> Result<Note, ApiError> {
    let note_id =
        note_id.ok_or_else(|| ApiError::BadRequest("Note ID is required".to_string()))?;

    let note = state
        .db
        .notes
        .find_owned(user_id, note_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    let has_content = note
        .content
        .as_deref()
        .map(|c| !c.trim().is_empty())
        .unwrap_or(false);
    if !has_content {
        return Err(ApiError::BadRequest("Note content is empty".to_string()));
    }

    Ok(note)
}

/// Log a generation failure with full detail and return the short message
/// the client sees.
fn generation_failed(op: &str, public_message: &str, err: Error) -> ApiError {
    error!(
        subsystem = "api",
        component = "ai",
        op = op,
        error = %err,
        "AI generation failed"
    );
    ApiError::Internal(public_message.to_string())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Generate and persist a summary for a note.
pub async fn generate_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<GenerateBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let note = require_note_with_content(&state, user_id, body.note_id).await?;
    let content = note.content.as_deref().unwrap_or_default();

    let text = state
        .ai
        .summarize(content, note.title.as_deref())
        .await
        .map_err(|e| generation_failed("summary", "Failed to generate summary", e))?;

    let summary = state.db.summaries.insert(note.id, &text).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "summary": summary })),
    ))
}

/// Generate and persist a quiz for a note.
///
/// The model response must parse as a quiz JSON document; otherwise the
/// operation fails and no row is written.
pub async fn generate_quiz(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<GenerateBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let note = require_note_with_content(&state, user_id, body.note_id).await?;
    let content = note.content.as_deref().unwrap_or_default();

    let raw = state
        .ai
        .quiz(content, note.title.as_deref())
        .await
        .map_err(|e| generation_failed("quiz", "Failed to generate quiz", e))?;

    // Validate before persisting; the raw document is what gets stored.
    parse_quiz_payload(&raw)
        .map_err(|e| generation_failed("quiz", "Failed to generate quiz", e))?;

    let quiz = state.db.quizzes.insert(note.id, &raw).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "quiz": quiz })),
    ))
}

/// Chat with the assistant, optionally grounded in one of the caller's notes,
/// and persist the exchange.
pub async fn chat_with_ai(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<AiChatBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    // A note id that is missing, unowned, or empty silently contributes no
    // context; the chat still goes through.
    let mut context = None;
    if let Some(note_id) = body.note_id {
        if let Some(note) = state.db.notes.find_owned(user_id, note_id).await? {
            if let Some(content) = note.content.as_deref().filter(|c| !c.is_empty()) {
                context = Some(note_context(note.title.as_deref(), content));
            }
        }
    }

    let response = state
        .ai
        .chat(&message, context.as_deref())
        .await
        .map_err(|e| generation_failed("chat", "Failed to generate AI response", e))?;

    let entry = state.db.chat.insert(user_id, &message, &response).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": entry.message,
            "response": entry.response,
            "id": entry.id,
            "createdAt": entry.created_at_utc,
        })),
    ))
}

/// List the caller's summaries, optionally for one note.
pub async fn get_summaries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ArtifactListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(note_id) = query.note_id {
        state
            .db
            .notes
            .find_owned(user_id, note_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;
    }

    let summaries = state.db.summaries.list(user_id, query.note_id).await?;
    Ok(Json(serde_json::json!({ "summaries": summaries })))
}

/// List the caller's quizzes, optionally for one note.
pub async fn get_quizzes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ArtifactListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if let Some(note_id) = query.note_id {
        state
            .db
            .notes
            .find_owned(user_id, note_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;
    }

    let quizzes = state.db.quizzes.list(user_id, query.note_id).await?;
    Ok(Json(serde_json::json!({ "quizzes": quizzes })))
}

/// Delete one summary.
pub async fn delete_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.db.summaries.delete(user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Summary not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Summary deleted successfully"
    })))
}

/// Delete one quiz.
pub async fn delete_quiz(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state.db.quizzes.delete(user_id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    }

    Ok(Json(serde_json::json!({
        "message": "Quiz deleted successfully"
    })))
}
