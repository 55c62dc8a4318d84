//! Request middleware for mindmate-api.

pub mod auth;
