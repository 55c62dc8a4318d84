//! # mindmate-db
//!
//! PostgreSQL database layer for mindmate.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for all core entities
//! - Uniform ownership scoping: every read/update/delete filters by the
//!   requesting user's ownership, directly or transitively
//!
//! ## Example
//!
//! ```rust,ignore
//! use mindmate_db::{Database, FolderRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/mindmate").await?;
//!
//!     let folder = db.folders.create(user_id, "Biology", None).await?;
//!     println!("Created folder: {}", folder.id);
//!     Ok(())
//! }
//! ```

pub mod artifacts;
pub mod chat_history;
pub mod folders;
pub mod notes;
pub mod pool;
pub mod users;

// Re-export core types
pub use mindmate_core::*;

// Re-export repository implementations
pub use artifacts::PgArtifactRepository;
pub use chat_history::PgChatHistoryRepository;
pub use folders::PgFolderRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use users::PgUserRepository;

/// Combined database context with all repositories.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// User account repository.
    pub users: PgUserRepository,
    /// Folder tree repository.
    pub folders: PgFolderRepository,
    /// Note repository.
    pub notes: PgNoteRepository,
    /// Generated summary repository.
    pub summaries: PgArtifactRepository,
    /// Generated quiz repository.
    pub quizzes: PgArtifactRepository,
    /// Chat history repository.
    pub chat: PgChatHistoryRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            folders: PgFolderRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool.clone()),
            summaries: PgArtifactRepository::new(pool.clone(), ArtifactKind::Summary),
            quizzes: PgArtifactRepository::new(pool.clone(), ArtifactKind::Quiz),
            chat: PgChatHistoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect to the database and build all repositories.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Internal(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
