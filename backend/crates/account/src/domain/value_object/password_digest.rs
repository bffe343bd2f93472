//! Password Digest Value Object
//!
//! Stored PHC string. Deliberately not `Serialize`.

use platform::password::HashedPassword;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub fn from_db(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_phc_str(&self) -> &str {
        &self.0
    }
}

impl From<HashedPassword> for PasswordDigest {
    fn from(hashed: HashedPassword) -> Self {
        Self(hashed.into_phc_string())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([HASH])")
    }
}
