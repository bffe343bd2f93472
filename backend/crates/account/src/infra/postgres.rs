//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::pagination::PageRequest;
use sqlx::PgPool;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountDirectory;
use crate::domain::value_object::{
    account_id::AccountId, account_name::AccountName, account_status::AccountStatus, age::Age,
    email::Email, password_digest::PasswordDigest,
};
use crate::error::{AccountError, AccountResult};

const ACCOUNT_COLUMNS: &str = r#"
    id,
    name,
    email,
    password_hash,
    age,
    is_active,
    created_at,
    updated_at,
    deleted_at
"#;

/// PostgreSQL-backed account directory
#[derive(Clone)]
pub struct PgAccountDirectory {
    pool: PgPool,
}

impl PgAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a unique violation on `users.email` to `DuplicateEmail`
fn map_write_error(err: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return AccountError::DuplicateEmail;
        }
    }
    AccountError::Database(err)
}

impl AccountDirectory for PgAccountDirectory {
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_id_active(&self, id: AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1 AND is_active = TRUE"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn find_by_id(&self, id: AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn create(&self, account: NewAccount) -> AccountResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, age, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_digest.as_phc_str())
        .bind(account.age.map(|a| a.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_account())
    }

    async fn save(&self, account: &Account) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                age = $5,
                is_active = $6,
                updated_at = $7,
                deleted_at = $8
            WHERE id = $1
            "#,
        )
        .bind(account.id.value())
        .bind(account.name.as_str())
        .bind(account.email.as_str())
        .bind(account.password_digest.as_phc_str())
        .bind(account.age.map(|a| a.value()))
        .bind(account.status.is_active())
        .bind(account.updated_at)
        .bind(account.deleted_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::NotFound);
        }

        Ok(())
    }

    async fn list_active(&self, page: PageRequest) -> AccountResult<(Vec<Account>, u64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS} FROM users
            WHERE is_active = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(i64::from(page.limit()))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        let accounts = rows.into_iter().map(AccountRow::into_account).collect();

        Ok((accounts, total.max(0) as u64))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    age: Option<i32>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            id: AccountId::new(self.id),
            name: AccountName::from_db(self.name),
            email: Email::from_db(self.email),
            password_digest: PasswordDigest::from_db(self.password_hash),
            age: self.age.map(Age::from_db),
            status: AccountStatus::from_is_active(self.is_active),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}
