//! Account ID Value Object
//!
//! Numeric identifier assigned by the directory on creation.

use kernel::id::Id;

use crate::error::{AccountError, AccountResult};

/// Marker type for account ids
pub struct AccountMarker;

/// Account identifier
pub type AccountId = Id<AccountMarker>;

/// Parse an id taken from a request path
pub fn parse_account_id(raw: &str) -> AccountResult<AccountId> {
    raw.parse::<AccountId>().map_err(|_| AccountError::InvalidId)
}
