//! Get Account Use Case

use std::sync::Arc;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

/// Get account use case
///
/// Deactivated accounts are reported as not found.
pub struct GetAccountUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
}

impl<R> GetAccountUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, id: AccountId) -> AccountResult<Account> {
        self.directory
            .find_by_id_active(id)
            .await?
            .ok_or(AccountError::NotFound)
    }
}
