//! In-process account service
//!
//! Accounts and tokens live in memory for the lifetime of the process.
//! Passwords are never stored: each account keeps a random salt and the
//! base64 SHA-256 digest of `salt || password`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ServiceError;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of an issued access token
    pub access_token_expire_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_expire_minutes: 60 * 24 * 7,
        }
    }
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Issued credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub email: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

struct Account {
    info: AccountInfo,
    salt: String,
    password_hash: String,
}

#[derive(Default)]
pub struct AccountService {
    config: AuthConfig,
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, AccessToken>,
}

impl AccountService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            accounts: HashMap::new(),
            tokens: HashMap::new(),
        }
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// `ServiceError::Validation` if the email is malformed or already
    /// registered, or the password is shorter than `MIN_PASSWORD_LEN`.
    pub fn register(&mut self, email: &str, password: &SecretString) -> Result<AccountInfo, ServiceError> {
        let email = normalize_email(email)?;

        if password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        if self.accounts.contains_key(&email) {
            return Err(ServiceError::Validation("Email already registered.".to_string()));
        }

        let salt = Uuid::new_v4().to_string();
        let password_hash = hash_password(&salt, password);
        let info = AccountInfo {
            email: email.clone(),
            created_at: Utc::now(),
        };

        self.accounts.insert(
            email.clone(),
            Account {
                info: info.clone(),
                salt,
                password_hash,
            },
        );

        tracing::info!(email = %email, "account registered");
        Ok(info)
    }

    /// Check credentials and issue a bearer token
    ///
    /// # Errors
    ///
    /// `ServiceError::Authentication` for an unknown email or wrong password.
    pub fn login(&mut self, email: &str, password: &SecretString) -> Result<AccessToken, ServiceError> {
        let rejected = || ServiceError::Authentication("Incorrect email or password.".to_string());

        let email = normalize_email(email).map_err(|_| rejected())?;
        let account = self.accounts.get(&email).ok_or_else(rejected)?;

        if hash_password(&account.salt, password) != account.password_hash {
            tracing::warn!(email = %email, "rejected sign-in");
            return Err(rejected());
        }

        let token = AccessToken {
            email: account.info.email.clone(),
            access_token: Uuid::new_v4().simple().to_string(),
            token_type: "bearer".to_string(),
            expires_at: Utc::now() + Duration::minutes(self.config.access_token_expire_minutes),
        };
        self.tokens.insert(token.access_token.clone(), token.clone());

        tracing::info!(email = %email, "signed in");
        Ok(token)
    }

    /// Email owning `token`, if it exists and has not expired
    pub fn verify_token(&self, token: &str) -> Option<&str> {
        self.tokens
            .get(token)
            .filter(|t| t.expires_at > Utc::now())
            .map(|t| t.email.as_str())
    }

    /// Forget `token`; returns whether it was known
    pub fn revoke(&mut self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }

    pub fn account(&self, email: &str) -> Option<&AccountInfo> {
        self.accounts.get(&email.trim().to_lowercase()).map(|a| &a.info)
    }
}

fn hash_password(salt: &str, password: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.expose_secret().as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Lowercase, trimmed email with a minimal shape check
fn normalize_email(email: &str) -> Result<String, ServiceError> {
    let email = email.trim().to_lowercase();
    let invalid = || ServiceError::Validation(format!("'{}' is not a valid email address.", email));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let dot = domain.rfind('.').ok_or_else(invalid)?;
    if dot == 0 || dot == domain.len() - 1 {
        return Err(invalid());
    }

    Ok(email)
}
