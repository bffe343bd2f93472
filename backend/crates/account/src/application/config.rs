//! Application Services
//!
//! Stateless services shared by every use case, built once at startup.

use platform::password::{
    ClearTextPassword, CredentialHasher, HasherConfig, PasswordHashError, PasswordPolicy,
};
use platform::token::{TokenConfig, TokenService};

use crate::domain::entity::account::Account;
use crate::domain::value_object::password_digest::PasswordDigest;
use crate::error::{AccountError, AccountResult};

/// Account application services
#[derive(Debug, Clone)]
pub struct AccountServices {
    pub hasher: CredentialHasher,
    pub tokens: TokenService,
    pub password_policy: PasswordPolicy,
}

impl AccountServices {
    pub fn new(
        hasher_config: &HasherConfig,
        token_config: &TokenConfig,
    ) -> Result<Self, PasswordHashError> {
        Ok(Self {
            hasher: CredentialHasher::new(hasher_config)?,
            tokens: TokenService::new(token_config),
            password_policy: PasswordPolicy::default(),
        })
    }

    /// Hash on the blocking pool; Argon2 would otherwise stall the runtime
    pub async fn hash_password(&self, password: ClearTextPassword) -> AccountResult<PasswordDigest> {
        let hasher = self.hasher.clone();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        Ok(hashed.into())
    }

    /// Verify on the blocking pool
    pub async fn verify_password(
        &self,
        password: ClearTextPassword,
        digest: &PasswordDigest,
    ) -> AccountResult<bool> {
        let hasher = self.hasher.clone();
        let phc = digest.as_phc_str().to_string();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &phc)).await?;
        Ok(matches)
    }

    /// Issue a bearer token for an account
    pub fn issue_token(&self, account: &Account) -> AccountResult<String> {
        self.tokens
            .issue(account.id.value(), account.email.as_str())
            .map_err(AccountError::TokenIssue)
    }
}

#[cfg(test)]
pub(crate) fn test_services() -> AccountServices {
    let hasher_config = HasherConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    let token_config = TokenConfig {
        secret: "test-secret".to_string(),
        ttl: platform::token::DEFAULT_TOKEN_TTL,
    };
    AccountServices::new(&hasher_config, &token_config).unwrap()
}

/// Like [`test_services`], but token issuing always fails
#[cfg(test)]
pub(crate) fn test_services_without_signing() -> AccountServices {
    AccountServices {
        tokens: TokenService::failing(),
        ..test_services()
    }
}
