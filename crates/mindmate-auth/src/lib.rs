//! # mindmate-auth
//!
//! Authentication primitives for mindmate: HS256 bearer tokens and Argon2id
//! password hashing.
//!
//! Tokens are issued only at signup/signin and carry the user id as their
//! subject. There is no refresh or rotation mechanism; expiry forces
//! re-authentication.

pub mod claims;
pub mod password;
pub mod token;

pub use claims::Claims;
pub use password::PasswordHasher;
pub use token::TokenService;
