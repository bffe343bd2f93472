//! In-Memory Account Directory
//!
//! Same contract as the PostgreSQL directory, held in process memory.
//! Used by tests and when no database is configured. Data is lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::pagination::PageRequest;
use tokio::sync::RwLock;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::{account_id::AccountId, email::Email};
use crate::error::{AccountError, AccountResult};

#[derive(Default)]
struct Store {
    next_id: i64,
    accounts: BTreeMap<AccountId, Account>,
}

impl Store {
    fn email_taken(&self, email: &Email, except: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|a| &a.email == email && Some(a.id) != except)
    }
}

/// Process-local account directory
///
/// Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct InMemoryAccountDirectory {
    store: Arc<RwLock<Store>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let store = self.store.read().await;
        Ok(store.accounts.values().find(|a| &a.email == email).cloned())
    }

    async fn find_by_id_active(&self, id: AccountId) -> AccountResult<Option<Account>> {
        let store = self.store.read().await;
        Ok(store.accounts.get(&id).filter(|a| a.is_active()).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> AccountResult<Option<Account>> {
        let store = self.store.read().await;
        Ok(store.accounts.get(&id).cloned())
    }

    async fn create(&self, account: NewAccount) -> AccountResult<Account> {
        // Check and insert under one write lock
        let mut store = self.store.write().await;

        if store.email_taken(&account.email, None) {
            return Err(AccountError::DuplicateEmail);
        }

        store.next_id += 1;
        let id = AccountId::new(store.next_id);
        let account = Account::from_new(id, account, Utc::now());
        store.accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn save(&self, account: &Account) -> AccountResult<()> {
        let mut store = self.store.write().await;

        if !store.accounts.contains_key(&account.id) {
            return Err(AccountError::NotFound);
        }

        if store.email_taken(&account.email, Some(account.id)) {
            return Err(AccountError::DuplicateEmail);
        }

        store.accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn list_active(&self, page: PageRequest) -> AccountResult<(Vec<Account>, u64)> {
        let store = self.store.read().await;

        let active = store.accounts.values().filter(|a| a.is_active());
        let total = active.clone().count() as u64;
        let items = active
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        account_name::AccountName, password_digest::PasswordDigest,
    };

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: AccountName::new("Test").unwrap(),
            email: Email::new(email).unwrap(),
            password_digest: PasswordDigest::from_db("$argon2id$stub"),
            age: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let directory = InMemoryAccountDirectory::new();
        let first = directory.create(new_account("a@x.com")).await.unwrap();
        let second = directory.create(new_account("b@x.com")).await.unwrap();
        assert!(first.id < second.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let directory = InMemoryAccountDirectory::new();
        directory.create(new_account("a@x.com")).await.unwrap();

        let result = directory.create(new_account("a@x.com")).await;
        assert!(matches!(result, Err(AccountError::DuplicateEmail)));

        // Case-sensitive
        assert!(directory.create(new_account("A@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration() {
        let directory = InMemoryAccountDirectory::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let directory = directory.clone();
                tokio::spawn(async move { directory.create(new_account("race@x.com")).await })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AccountError::DuplicateEmail) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 7);
    }

    #[tokio::test]
    async fn test_save_rejects_taken_email() {
        let directory = InMemoryAccountDirectory::new();
        directory.create(new_account("a@x.com")).await.unwrap();
        let mut second = directory.create(new_account("b@x.com")).await.unwrap();

        second.change_email(Email::new("a@x.com").unwrap());
        assert!(matches!(
            directory.save(&second).await,
            Err(AccountError::DuplicateEmail)
        ));

        // Saving with its own email is fine
        let unchanged = directory.find_by_id(second.id).await.unwrap().unwrap();
        assert!(directory.save(&unchanged).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_id_active_skips_deactivated() {
        let directory = InMemoryAccountDirectory::new();
        let mut account = directory.create(new_account("a@x.com")).await.unwrap();
        account.deactivate();
        directory.save(&account).await.unwrap();

        assert!(directory.find_by_id_active(account.id).await.unwrap().is_none());
        assert!(directory.find_by_id(account.id).await.unwrap().is_some());
        assert!(directory.find_by_email(&account.email).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_active_paginates() {
        let directory = InMemoryAccountDirectory::new();
        for i in 0..5 {
            directory
                .create(new_account(&format!("user{i}@x.com")))
                .await
                .unwrap();
        }
        let mut inactive = directory.create(new_account("gone@x.com")).await.unwrap();
        inactive.deactivate();
        directory.save(&inactive).await.unwrap();

        let page = PageRequest::from_query(Some("2"), Some("2"));
        let (items, total) = directory.list_active(page).await.unwrap();

        assert_eq!(total, 5);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].email.as_str(), "user2@x.com");
        assert_eq!(items[1].email.as_str(), "user3@x.com");
    }
}
