//! Repository Traits
//!
//! Interface for account persistence. Implementations are in the
//! infrastructure layer.

use kernel::pagination::PageRequest;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::AccountResult;

/// Account directory trait
///
/// Every call is atomic on its own. Email uniqueness is enforced here:
/// `create` and `save` fail with `AccountError::DuplicateEmail` when the
/// email already belongs to another account, even under concurrent writes.
#[trait_variant::make(AccountDirectory: Send)]
pub trait LocalAccountDirectory {
    /// Find any account (active or not) by exact email
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>>;

    /// Find an account by ID, only if active
    async fn find_by_id_active(&self, id: AccountId) -> AccountResult<Option<Account>>;

    /// Find an account by ID regardless of status
    async fn find_by_id(&self, id: AccountId) -> AccountResult<Option<Account>>;

    /// Insert a new account and return it with its assigned ID
    async fn create(&self, account: NewAccount) -> AccountResult<Account>;

    /// Persist changes to an existing account
    async fn save(&self, account: &Account) -> AccountResult<()>;

    /// One page of active accounts ordered by ID, plus the total active count
    async fn list_active(&self, page: PageRequest) -> AccountResult<(Vec<Account>, u64)>;
}
