//! Account Name Value Object
//!
//! 表示名。ログインには使わないため、文字種の制限は設けない。
//!
//! ## 不変条件
//! - 前後の空白は取り除いて保持する
//! - 長さ: 1〜50文字（Unicode scalar value 単位）

use serde::Serialize;
use std::fmt;

use crate::error::{AccountError, AccountResult};

/// Minimum name length (in characters)
pub const ACCOUNT_NAME_MIN_LENGTH: usize = 1;

/// Maximum name length (in characters)
pub const ACCOUNT_NAME_MAX_LENGTH: usize = 50;

/// Display name of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(raw: impl AsRef<str>) -> AccountResult<Self> {
        let name = raw.as_ref().trim();
        let length = name.chars().count();

        if length < ACCOUNT_NAME_MIN_LENGTH {
            return Err(AccountError::invalid("name: is required"));
        }

        if length > ACCOUNT_NAME_MAX_LENGTH {
            return Err(AccountError::invalid(format!(
                "name: must be at most {} characters",
                ACCOUNT_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// Restore from a stored value
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
