//! Authenticate Use Case
//!
//! Resolves an `Authorization` header value to the active account it names.
//! Every step short-circuits:
//!
//! 1. no header → `MissingAuthorization`
//! 2. not exactly `Bearer <token>` → `MalformedAuthorization`
//! 3. token fails validation → `InvalidToken`
//! 4. account missing or deactivated → `AccountUnavailable`
//!
//! Status is read from the directory on every call, so deactivation takes
//! effect for tokens that are still unexpired.

use std::sync::Arc;

use crate::application::config::AccountServices;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

/// Identity attached to an authenticated request
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account: Account,
}

impl CurrentAccount {
    pub fn id(&self) -> AccountId {
        self.account.id
    }
}

/// Split `Bearer <token>` on single spaces; anything but two parts is malformed
pub fn parse_bearer(header: &str) -> AccountResult<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(AccountError::MalformedAuthorization),
    }
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
    services: Arc<AccountServices>,
}

impl<R> AuthenticateUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>, services: Arc<AccountServices>) -> Self {
        Self {
            directory,
            services,
        }
    }

    pub async fn execute(&self, authorization: Option<&str>) -> AccountResult<CurrentAccount> {
        let header = authorization.ok_or(AccountError::MissingAuthorization)?;
        let token = parse_bearer(header)?;

        let claims = self
            .services
            .tokens
            .validate(token)
            .map_err(AccountError::InvalidToken)?;

        let account = self
            .directory
            .find_by_id_active(AccountId::new(claims.user_id))
            .await?
            .ok_or(AccountError::AccountUnavailable)?;

        Ok(CurrentAccount { account })
    }
}
