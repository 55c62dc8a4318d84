//! Core data models for mindmate.
//!
//! These types are shared across all mindmate crates and represent the core
//! domain entities. Struct fields follow Rust naming; serde renames produce
//! the camelCase wire format the client consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// USER TYPES
// =============================================================================

/// A registered account, including the stored credential hash.
///
/// Never serialized to clients; use [`PublicUser`] for responses.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub created_at_utc: DateTime<Utc>,
}

/// Client-facing projection of a user (no credential material).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            created_at_utc: u.created_at_utc,
        }
    }
}

// =============================================================================
// FOLDER TYPES
// =============================================================================

/// A folder in a user's tree. Root folders have no parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Folder {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
}

/// A folder with its direct children and contained note references.
///
/// `parent` is populated only on single-folder fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderDetail {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
    pub children: Vec<Folder>,
    pub notes: Vec<NoteRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Folder>,
}

/// Minimal folder reference embedded in note responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderRef {
    pub id: Uuid,
    pub name: String,
}

// =============================================================================
// NOTE TYPES
// =============================================================================

/// Lightweight note reference for folder listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteRef {
    pub id: Uuid,
    pub title: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at_utc: DateTime<Utc>,
}

/// A note with its owning-folder reference, as returned by list endpoints.
///
/// `summaries`/`quizzes` carry id + timestamp references and are present only
/// on folder-filtered listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    #[serde(rename = "folderId")]
    pub folder_id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at_utc: DateTime<Utc>,
    pub folder: FolderRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summaries: Option<Vec<ArtifactRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quizzes: Option<Vec<ArtifactRef>>,
}

/// A full note with its complete summary and quiz history, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteDetail {
    pub id: Uuid,
    #[serde(rename = "folderId")]
    pub folder_id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at_utc: DateTime<Utc>,
    pub folder: FolderRef,
    pub summaries: Vec<Artifact>,
    pub quizzes: Vec<Artifact>,
}

/// Minimal note reference embedded in artifact responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteTitleRef {
    pub id: Uuid,
    pub title: Option<String>,
}

// =============================================================================
// AI ARTIFACT TYPES (summaries and quizzes)
// =============================================================================

/// Which artifact table a generated record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Summary,
    Quiz,
}

impl ArtifactKind {
    /// Table name backing this artifact kind.
    pub fn table(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "summary",
            ArtifactKind::Quiz => "quiz",
        }
    }

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Summary => "Summary",
            ArtifactKind::Quiz => "Quiz",
        }
    }
}

/// A generated summary or quiz row. History is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: Uuid,
    #[serde(rename = "noteId")]
    pub note_id: Uuid,
    pub response: String,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteTitleRef>,
}

/// Id + timestamp reference to an artifact, for note listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactRef {
    pub id: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
}

// =============================================================================
// CHAT HISTORY TYPES
// =============================================================================

/// One persisted chat exchange (user message + AI response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub message: String,
    pub response: String,
    #[serde(rename = "createdAt")]
    pub created_at_utc: DateTime<Utc>,
}

/// Pagination metadata for chat history listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl Pagination {
    /// Build pagination metadata; `has_more` is derived from the inputs.
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_strips_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            name: Some("Ada".to_string()),
            created_at_utc: Utc::now(),
        };

        let public: PublicUser = user.into();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(json.contains("\"email\":\"a@x.com\""));
        assert!(json.contains("\"createdAt\""));
    }

    #[test]
    fn test_folder_wire_field_names() {
        let folder = Folder {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            name: "Biology".to_string(),
            parent_id: None,
            created_at_utc: Utc::now(),
        };

        let json = serde_json::to_string(&folder).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"parentId\":null"));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("user_id"));
    }

    #[test]
    fn test_note_omits_artifact_refs_when_absent() {
        let note = Note {
            id: Uuid::nil(),
            folder_id: Uuid::nil(),
            title: Some("Cells".to_string()),
            content: None,
            created_at_utc: Utc::now(),
            updated_at_utc: Utc::now(),
            folder: FolderRef {
                id: Uuid::nil(),
                name: "Biology".to_string(),
            },
            summaries: None,
            quizzes: None,
        };

        let json = serde_json::to_string(&note).unwrap();
        assert!(!json.contains("summaries"));
        assert!(!json.contains("quizzes"));
        assert!(json.contains("\"folderId\""));
    }

    #[test]
    fn test_artifact_kind_tables() {
        assert_eq!(ArtifactKind::Summary.table(), "summary");
        assert_eq!(ArtifactKind::Quiz.table(), "quiz");
        assert_eq!(ArtifactKind::Quiz.label(), "Quiz");
    }

    #[test]
    fn test_pagination_has_more() {
        assert!(Pagination::new(100, 50, 0).has_more);
        assert!(Pagination::new(100, 50, 49).has_more);
        assert!(!Pagination::new(100, 50, 50).has_more);
        assert!(!Pagination::new(0, 50, 0).has_more);
        assert!(!Pagination::new(30, 50, 0).has_more);
    }
}
