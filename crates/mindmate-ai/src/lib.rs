//! # mindmate-ai
//!
//! AI delegation layer for mindmate.
//!
//! This crate provides:
//! - The OpenAI-compatible generation backend (`OpenAiBackend`)
//! - Fixed instructional prompt builders for summary/quiz/chat
//! - Quiz JSON payload validation
//! - A mock backend for tests (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable the deterministic mock backend
//!
//! # Example
//!
//! ```rust,no_run
//! use mindmate_ai::OpenAiBackend;
//! use mindmate_core::AiBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAiBackend::from_env().unwrap();
//!     let summary = backend.summarize("Note content", Some("Title")).await.unwrap();
//!     println!("{summary}");
//! }
//! ```

pub mod openai;
pub mod prompts;
pub mod quiz;

#[cfg(feature = "mock")]
pub mod mock;

// Re-export core types
pub use mindmate_core::{AiBackend, Error, Result};

pub use openai::OpenAiBackend;
pub use quiz::{parse_quiz_payload, QuizPayload, QuizQuestion};

#[cfg(feature = "mock")]
pub use mock::MockAiBackend;
