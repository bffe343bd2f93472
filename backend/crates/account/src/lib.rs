//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, directory trait
//! - `application/` - Use cases, bearer authentication, shared services
//! - `infra/` - PostgreSQL and in-memory directories
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Features
//! - Registration and login with email + password
//! - Stateless HS256 bearer tokens (24h by default)
//! - User management (list, get, create, partial update, soft delete)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never serialized outward
//! - Account status re-checked on every authenticated request
//! - Login failures do not reveal whether the email exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::{AccountServices, CurrentAccount};
pub use error::{AccountError, AccountResult};
pub use infra::{InMemoryAccountDirectory, PgAccountDirectory};
pub use presentation::router::account_router;
