//! List Accounts Use Case

use std::sync::Arc;

use kernel::pagination::{PageRequest, Pagination};

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountDirectory;
use crate::error::AccountResult;

/// One page of active accounts
pub struct ListAccountsOutput {
    pub accounts: Vec<Account>,
    pub pagination: Pagination,
}

/// List accounts use case
pub struct ListAccountsUseCase<R>
where
    R: AccountDirectory,
{
    directory: Arc<R>,
}

impl<R> ListAccountsUseCase<R>
where
    R: AccountDirectory,
{
    pub fn new(directory: Arc<R>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self, page: PageRequest) -> AccountResult<ListAccountsOutput> {
        let (accounts, total) = self.directory.list_active(page).await?;

        Ok(ListAccountsOutput {
            accounts,
            pagination: page.meta(total),
        })
    }
}
