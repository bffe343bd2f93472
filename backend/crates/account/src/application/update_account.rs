//! Update Account Use Case
//!
//! Partial update: absent fields are left alone. Works on deactivated
//! accounts too, which is how they get reactivated.

use std::sync::Arc;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::{
    account_id::AccountId, account_name::AccountName, account_status::AccountStatus, age::Age,
    email::Email,
};
use crate::error::{AccountError, AccountResult};

/// Update account input
#[derive(Default)]
pub struct UpdateAccountInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub is_active: Option<bool>,
}

/// Update account use case
pub struct UpdateAccountUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
}

impl<R> UpdateAccountUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, id: AccountId, input: UpdateAccountInput) -> AccountResult<Account> {
        let mut account = self
            .directory
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        // Validate everything before touching the entity
        let name = input.name.map(AccountName::new).transpose()?;
        let email = input.email.map(Email::new).transpose()?;
        let age = input.age.map(Age::new).transpose()?;

        if let Some(name) = name {
            account.rename(name);
        }

        if let Some(email) = email {
            if email != account.email {
                let taken = self
                    .directory
                    .find_by_email(&email)
                    .await?
                    .is_some_and(|other| other.id != account.id);
                if taken {
                    return Err(AccountError::DuplicateEmail);
                }
                account.change_email(email);
            }
        }

        if let Some(age) = age {
            account.set_age(age);
        }

        if let Some(is_active) = input.is_active {
            account.set_status(AccountStatus::from_is_active(is_active));
        }

        self.directory.save(&account).await?;

        tracing::info!(account_id = %account.id, status = %account.status, "Account updated");

        Ok(account)
    }
}
