//! Bearer Token Issuing and Validation
//!
//! HS256-signed JWTs carrying the account id and email. The algorithm is
//! pinned on both ends: tokens whose header names anything else are rejected.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Secret used when none is configured. Development only.
pub const FALLBACK_TOKEN_SECRET: &str = "your-secret-key";

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Token validation / issuing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a decodable HS256 token with the expected claims
    #[error("Malformed token")]
    Malformed,

    /// Signature does not match the configured secret
    #[error("Invalid token signature")]
    BadSignature,

    /// Current time is at or past the expiry
    #[error("Token expired")]
    Expired,

    /// Signing failed
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::BadSignature,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub user_id: i64,
    /// Account email at issue time
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Unique token id, keeps tokens issued in the same second distinct
    pub jti: String,
}

/// Token service configuration
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl: Duration,
}

impl TokenConfig {
    /// Use `secret` if present and non-empty, the fallback secret otherwise
    pub fn from_secret(secret: Option<String>, ttl: Duration) -> Self {
        let secret = secret
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_TOKEN_SECRET.to_string());
        Self { secret, ttl }
    }

    pub fn uses_fallback_secret(&self) -> bool {
        self.secret == FALLBACK_TOKEN_SECRET
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: FALLBACK_TOKEN_SECRET.to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Issues and validates bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_secs: i64::try_from(config.ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Service whose signing always fails (HS256 header, RSA-family key)
    #[cfg(any(test, feature = "test-util"))]
    pub fn failing() -> Self {
        let mut service = Self::new(&TokenConfig::default());
        service.encoding_key = EncodingKey::from_rsa_der(&[]);
        service
    }

    /// Issue a token valid from now for the configured lifetime
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`
    pub fn issue_at(
        &self,
        user_id: i64,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        // The library only rejects `exp < now`; a token is already dead at `exp`.
        if Utc::now().timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.max(0) as u64)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&TokenConfig {
            secret: secret.to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        })
    }

    #[test]
    fn test_issue_and_validate() {
        let service = service("test-secret");
        let token = service.issue(7, "a@x.com").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn test_tokens_are_unique() {
        let service = service("test-secret");
        let now = Utc::now();
        let first = service.issue_at(1, "a@x.com", now).unwrap();
        let second = service.issue_at(1, "a@x.com", now).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_expired_token() {
        let service = service("test-secret");
        let issued_at = Utc::now() - chrono::Duration::hours(25);
        let token = service.issue_at(1, "a@x.com", issued_at).unwrap();
        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_token_dead_at_expiry() {
        let service = service("test-secret");
        let issued_at = Utc::now() - chrono::Duration::hours(24);
        let token = service.issue_at(1, "a@x.com", issued_at).unwrap();
        assert_eq!(service.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret() {
        let token = service("secret-one").issue(1, "a@x.com").unwrap();
        assert_eq!(
            service("secret-two").validate(&token),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let service = service("test-secret");
        let token = service.issue(1, "a@x.com").unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, replacement, &signature[1..]);

        assert_eq!(service.validate(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_payload() {
        let service = service("test-secret");
        let mine = service.issue(1, "a@x.com").unwrap();
        let theirs = service.issue(2, "b@x.com").unwrap();

        let mine_parts: Vec<&str> = mine.split('.').collect();
        let theirs_parts: Vec<&str> = theirs.split('.').collect();
        let forged = format!("{}.{}.{}", mine_parts[0], theirs_parts[1], mine_parts[2]);

        assert_eq!(service.validate(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_token() {
        let service = service("test-secret");
        assert_eq!(service.validate(""), Err(TokenError::Malformed));
        assert_eq!(service.validate("garbage"), Err(TokenError::Malformed));
        assert_eq!(service.validate("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_foreign_algorithm_rejected() {
        let service = service("test-secret");
        let claims = Claims {
            user_id: 1,
            email: "a@x.com".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 3600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(service.validate(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_fallback_secret() {
        let config = TokenConfig::from_secret(None, DEFAULT_TOKEN_TTL);
        assert!(config.uses_fallback_secret());

        let config = TokenConfig::from_secret(Some(String::new()), DEFAULT_TOKEN_TTL);
        assert!(config.uses_fallback_secret());

        let config = TokenConfig::from_secret(Some("real".into()), DEFAULT_TOKEN_TTL);
        assert!(!config.uses_fallback_secret());
        assert!(!format!("{:?}", config).contains("real"));
    }

    #[test]
    fn test_failing_service_reports_encoding_error() {
        let result = TokenService::failing().issue(1, "a@x.com");
        assert!(matches!(result, Err(TokenError::Encoding(_))));
    }
}
