//! File upload HTTP handlers.
//!
//! File metadata persistence is intentionally unimplemented: the upload
//! endpoint accepts and echoes file info, and the per-filename endpoints
//! return stub responses.

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    Json,
};

use crate::middleware::auth::AuthUser;
use crate::ApiError;

/// Accept a multipart upload and echo the received file's metadata.
pub async fn upload_file(
    AuthUser(_user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        return Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "File uploaded successfully",
                "file": {
                    "originalName": original_name,
                    "size": data.len(),
                    "mimetype": mimetype,
                    "buffer": true,
                }
            })),
        ));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

/// Stub: file metadata storage is not implemented.
pub async fn get_file_info(
    AuthUser(_user_id): AuthUser,
    Path(filename): Path<String>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "File info endpoint - implement file metadata storage",
        "filename": filename,
    }))
}

/// Stub: file metadata storage is not implemented.
pub async fn delete_file(
    AuthUser(_user_id): AuthUser,
    Path(filename): Path<String>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "File deleted successfully",
        "filename": filename,
    }))
}
