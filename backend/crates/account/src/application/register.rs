//! Register Use Case
//!
//! Creates an account and issues its first bearer token.

use std::sync::Arc;

use crate::application::config::AccountServices;
use crate::application::create_account::{CreateAccountInput, CreateAccountUseCase};
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::error::AccountResult;

/// Register output
pub struct RegisterOutput {
    pub account: Account,
    pub token: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
    services: Arc<AccountServices>,
}

impl<R> RegisterUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>, services: Arc<AccountServices>) -> Self {
        Self {
            directory,
            services,
        }
    }

    /// A token failure after insertion leaves the account in place; the
    /// caller can log in to obtain a token.
    pub async fn execute(&self, input: CreateAccountInput) -> AccountResult<RegisterOutput> {
        let account = CreateAccountUseCase::new(self.directory.clone(), self.services.clone())
            .execute(input)
            .await?;

        let token = self.services.issue_token(&account)?;

        tracing::info!(account_id = %account.id, "Account registered");

        Ok(RegisterOutput { account, token })
    }
}
