//! Domain Layer
//!
//! Contains the account entity, value objects, and the directory port.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::account::{Account, NewAccount};
pub use repository::AccountDirectory;
