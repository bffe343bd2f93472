//! Create Account Use Case
//!
//! Validates input, hashes the password and inserts the account. Shared by
//! registration and the `POST /api/users` route.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountServices;
use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::{account_name::AccountName, age::Age, email::Email};
use crate::error::{AccountError, AccountResult};

/// Create account input
pub struct CreateAccountInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i64>,
}

/// Create account use case
pub struct CreateAccountUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
    services: Arc<AccountServices>,
}

impl<R> CreateAccountUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>, services: Arc<AccountServices>) -> Self {
        Self {
            directory,
            services,
        }
    }

    pub async fn execute(&self, input: CreateAccountInput) -> AccountResult<Account> {
        let name = AccountName::new(&input.name)?;
        let email = Email::new(input.email)?;
        let age = input.age.map(Age::new).transpose()?;

        let password = ClearTextPassword::new(input.password);
        self.services.password_policy.check(&password)?;

        // Fast path; the directory still enforces uniqueness on insert
        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let password_digest = self.services.hash_password(password).await?;

        let account = self
            .directory
            .create(NewAccount {
                name,
                email,
                password_digest,
                age,
            })
            .await?;

        tracing::info!(account_id = %account.id, "Account created");

        Ok(account)
    }
}
