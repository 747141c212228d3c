//! Account authentication and management service.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{Account, NewAccount, Role};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::infrastructure::throttle::AttemptStore;
use crate::utils::token::generate_token;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service for authenticating API requests via Bearer tokens and managing
/// the accounts that own them.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
///
/// Failed authentications are counted per client key in the shared
/// [`AttemptStore`]; once `max_attempts` is reached the client is refused
/// with `429` until the store's window expires.
pub struct AuthService<R: AccountRepository, S: AttemptStore + ?Sized> {
    repository: Arc<R>,
    attempts: Arc<S>,
    signing_secret: String,
    max_attempts: u64,
}

impl<R: AccountRepository, S: AttemptStore + ?Sized> AuthService<R, S> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - account repository for DB operations
    /// - `attempts` - shared failed-login counter
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    /// - `max_attempts` - failures allowed per client key and window; `0` disables throttling
    pub fn new(
        repository: Arc<R>,
        attempts: Arc<S>,
        signing_secret: String,
        max_attempts: u64,
    ) -> Self {
        Self {
            repository,
            attempts,
            signing_secret,
            max_attempts,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        hash_token_with(&self.signing_secret, token)
    }

    /// Authenticates a raw token and returns the owning account.
    ///
    /// On success the client's failure counter is cleared and the account's
    /// `last_seen_at` is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TooManyRequests`] if `client_key` has exhausted its
    /// failed attempts for the current window.
    ///
    /// Returns [`AppError::Unauthorized`] if the token does not match any
    /// active account.
    pub async fn authenticate(&self, token: &str, client_key: &str) -> Result<Account, AppError> {
        let throttled = self.max_attempts > 0;

        if throttled {
            let failures = self.attempts.attempts(client_key).await.unwrap_or(0);
            if failures >= self.max_attempts {
                metrics::counter!("auth_throttled_total").increment(1);
                warn!(client = %client_key, failures, "Login attempts exhausted");
                return Err(AppError::too_many_requests(
                    "Too many failed login attempts, try again later",
                    json!({ "max_attempts": self.max_attempts }),
                ));
            }
        }

        let token_hash = self.hash_token(token);

        let Some(account) = self
            .repository
            .find_active_by_token_hash(&token_hash)
            .await?
        else {
            if throttled {
                let failures = self.attempts.record_failure(client_key).await.unwrap_or(0);
                warn!(client = %client_key, failures, "Rejected invalid token");
            }
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or revoked token" }),
            ));
        };

        if throttled {
            let _ = self.attempts.reset(client_key).await;
        }
        let _ = self.repository.touch_last_seen(account.id).await;

        Ok(account)
    }

    /// Creates an account and returns it together with its raw token.
    ///
    /// The raw token is not recoverable afterwards; only its hash is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the email or display name is empty.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn create_account(
        &self,
        email: &str,
        display_name: &str,
        role: Role,
    ) -> Result<(Account, String), AppError> {
        let email = email.trim().to_lowercase();
        let display_name = display_name.trim();

        if email.is_empty() || !email.contains('@') {
            return Err(AppError::bad_request(
                "A valid email is required",
                json!({ "email": email }),
            ));
        }
        if display_name.is_empty() {
            return Err(AppError::bad_request(
                "Display name cannot be empty",
                json!({}),
            ));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "An account with this email already exists",
                json!({ "email": email }),
            ));
        }

        let token = generate_token()?;
        let account = self
            .repository
            .create(NewAccount {
                email,
                display_name: display_name.to_string(),
                role,
                token_hash: self.hash_token(&token),
            })
            .await?;

        info!(account_id = account.id, role = %account.role, "Account created");

        Ok((account, token))
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, AppError> {
        self.repository.list().await
    }

    /// Revokes an account's token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account does not exist or is
    /// already revoked.
    pub async fn revoke_account(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.revoke(id).await? {
            return Err(AppError::not_found(
                "Account not found or already revoked",
                json!({ "account_id": id }),
            ));
        }

        info!(account_id = id, "Account revoked");
        Ok(())
    }

    /// Reports whether the attempt store backend is reachable.
    pub async fn throttle_healthy(&self) -> bool {
        self.attempts.health_check().await
    }
}

/// Hashes a token with an explicit secret.
///
/// Shared with the admin CLI so tokens it issues verify on the server.
pub fn hash_token_with(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
