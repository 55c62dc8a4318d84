//! HTTP handler modules for mindmate-api.

pub mod ai;
pub mod chat;
pub mod folders;
pub mod notes;
pub mod upload;
pub mod users;
