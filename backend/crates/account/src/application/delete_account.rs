//! Delete Account Use Case
//!
//! Soft delete only: the account is deactivated and stamped, never removed.

use std::sync::Arc;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

/// Delete account use case
pub struct DeleteAccountUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, id: AccountId) -> AccountResult<Account> {
        let mut account = self
            .directory
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        account.deactivate();
        self.directory.save(&account).await?;

        tracing::info!(account_id = %account.id, "Account deactivated");

        Ok(account)
    }
}
