//! Centralized default constants for the mindmate system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Crates reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// GENERATION
// =============================================================================

/// Default OpenAI-compatible API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default generation model.
pub const GEN_MODEL: &str = "gpt-4o";

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 60;

/// Token budget for summary generation.
pub const SUMMARY_MAX_TOKENS: u32 = 500;

/// Token budget for quiz generation.
pub const QUIZ_MAX_TOKENS: u32 = 1000;

/// Token budget for chat responses.
pub const CHAT_MAX_TOKENS: u32 = 800;

/// Sampling temperature for summary and quiz generation.
pub const STRUCTURED_TEMPERATURE: f32 = 0.3;

/// Sampling temperature for chat responses.
pub const CHAT_TEMPERATURE: f32 = 0.7;

// =============================================================================
// AUTH
// =============================================================================

/// Token lifetime in hours. Expiry forces re-authentication; there is no
/// refresh mechanism.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Minimum accepted password length at signup.
pub const PASSWORD_MIN_LENGTH: usize = 6;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for chat history listings.
pub const CHAT_PAGE_LIMIT: i64 = 50;

/// Default page offset.
pub const PAGE_OFFSET: i64 = 0;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum accepted request body size in bytes (10 MB).
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
