//! Age Value Object

use serde::Serialize;

use crate::error::{AccountError, AccountResult};

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 120;

/// Age in years, 18..=120
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Age(i32);

impl Age {
    pub fn new(years: i64) -> AccountResult<Self> {
        if !(MIN_AGE..=MAX_AGE).contains(&years) {
            return Err(AccountError::invalid(format!(
                "age: must be between {} and {}",
                MIN_AGE, MAX_AGE
            )));
        }
        Ok(Self(years as i32))
    }

    pub fn from_db(years: i32) -> Self {
        Self(years)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_bounds() {
        assert!(Age::new(17).is_err());
        assert_eq!(Age::new(18).unwrap().value(), 18);
        assert_eq!(Age::new(120).unwrap().value(), 120);
        assert!(Age::new(121).is_err());
        assert!(Age::new(-1).is_err());
        assert!(Age::new(i64::MAX).is_err());
    }
}
