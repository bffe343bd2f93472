//! Account email
//!
//! Kept byte-for-byte as submitted. Lookup and uniqueness are case-sensitive,
//! so `A@x.com` and `a@x.com` can belong to two different accounts.

use serde::Serialize;
use std::fmt;

use crate::error::{AccountError, AccountResult};

const MAX_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl Into<String>) -> AccountResult<Self> {
        let raw = raw.into();
        match shape_problem(&raw) {
            None => Ok(Self(raw)),
            Some(problem) => Err(AccountError::invalid(format!("email: {problem}"))),
        }
    }

    /// Rows in the directory were checked on the way in.
    pub fn from_db(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// First rule `candidate` breaks, if any
fn shape_problem(candidate: &str) -> Option<&'static str> {
    if candidate.is_empty() {
        return Some("is required");
    }
    if candidate.len() > MAX_LEN {
        return Some("must be at most 254 characters");
    }
    if candidate.chars().any(char::is_whitespace) {
        return Some("invalid format");
    }

    let mut halves = candidate.split('@');
    let (Some(local), Some(domain), None) = (halves.next(), halves.next(), halves.next()) else {
        return Some("invalid format");
    };

    let local_ok = (1..=MAX_LOCAL_LEN).contains(&local.len());
    let domain_ok = domain.contains('.')
        && domain
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-']);

    if local_ok && domain_ok {
        None
    } else {
        Some("invalid format")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
