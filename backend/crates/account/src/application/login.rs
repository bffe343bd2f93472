//! Login Use Case
//!
//! Exchanges email + password for a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountServices;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::email::Email;
use crate::error::{AccountError, AccountResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub account: Account,
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
    services: Arc<AccountServices>,
}

impl<R> LoginUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>, services: Arc<AccountServices>) -> Self {
        Self {
            directory,
            services,
        }
    }

    /// Password is checked before status, so an inactive account is only
    /// revealed to someone who knows its password.
    pub async fn execute(&self, input: LoginInput) -> AccountResult<LoginOutput> {
        let email = Email::new(input.email)?;
        if input.password.is_empty() {
            return Err(AccountError::invalid("password: is required"));
        }

        let account = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let password = ClearTextPassword::new(input.password);
        if !self
            .services
            .verify_password(password, &account.password_digest)
            .await?
        {
            return Err(AccountError::InvalidCredentials);
        }

        if !account.is_active() {
            return Err(AccountError::AccountInactive);
        }

        let token = self.services.issue_token(&account)?;

        tracing::info!(account_id = %account.id, "Account logged in");

        Ok(LoginOutput { account, token })
    }
}
