//! Platform Crate - Technical Infrastructure
//!
//! Domain-agnostic building blocks shared by the feature crates:
//! - Password hashing (Argon2id) and password length policy
//! - Bearer token issuing and validation (HS256 JWT)

pub mod password;
pub mod token;
