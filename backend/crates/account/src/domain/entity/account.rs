//! Account Entity
//!
//! A registered user of the service. The password digest lives on the entity
//! but never leaves the application layer: response views are built field by
//! field.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_name::AccountName, account_status::AccountStatus, age::Age,
    email::Email, password_digest::PasswordDigest,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned identifier
    pub id: AccountId,
    /// Display name
    pub name: AccountName,
    /// Login email (unique, case-sensitive)
    pub email: Email,
    /// Argon2id PHC string
    pub password_digest: PasswordDigest,
    pub age: Option<Age>,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the account was soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Materialize a freshly inserted account
    pub fn from_new(id: AccountId, new: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            password_digest: new.password_digest,
            age: new.age,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn rename(&mut self, name: AccountName) {
        self.name = name;
        self.touch();
    }

    pub fn change_email(&mut self, email: Email) {
        self.email = email;
        self.touch();
    }

    pub fn set_age(&mut self, age: Age) {
        self.age = Some(age);
        self.touch();
    }

    /// `deleted_at` always follows the status: stamped on deactivation,
    /// cleared on reactivation.
    pub fn set_status(&mut self, status: AccountStatus) {
        match status {
            AccountStatus::Active => {
                self.status = AccountStatus::Active;
                self.deleted_at = None;
                self.touch();
            }
            AccountStatus::Deactivated => self.deactivate(),
        }
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        let now = Utc::now();
        self.status = AccountStatus::Deactivated;
        self.deleted_at.get_or_insert(now);
        self.updated_at = now;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input to `AccountDirectory::create`
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: AccountName,
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub age: Option<Age>,
}
