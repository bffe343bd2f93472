//! Shared Kernel - Domain-crossing minimal core
//!
//! - Unified HTTP error type
//! - Typed numeric identifiers
//! - Pagination arithmetic for list endpoints
//!
//! Only things whose meaning is the same in every bounded context belong here.

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
}
pub mod id;
pub mod pagination;
