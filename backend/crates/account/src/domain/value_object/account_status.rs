//! Account Status Value Object
//!
//! Two states only. Deactivation is a soft delete: the row stays, login and
//! bearer authentication stop working.

use std::fmt;

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountStatus {
    /// Normal account
    #[default]
    Active,

    /// Soft-deleted or administratively disabled
    Deactivated,
}

impl AccountStatus {
    /// Map from the stored `is_active` flag
    #[inline]
    pub const fn from_is_active(is_active: bool) -> Self {
        if is_active {
            Self::Active
        } else {
            Self::Deactivated
        }
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deactivated => "deactivated",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
