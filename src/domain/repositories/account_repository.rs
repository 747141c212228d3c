//! Repository trait for portal accounts.

use crate::domain::entities::{Account, NewAccount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for accounts and their access tokens.
///
/// Tokens are stored only as HMAC-SHA256 hashes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or token hash already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds the non-revoked account owning a token hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_token_hash(&self, token_hash: &str)
    -> Result<Option<Account>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Lists all accounts, newest first.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    /// Records the time of the last successful authentication.
    async fn touch_last_seen(&self, id: i64) -> Result<(), AppError>;

    /// Revokes an account's token.
    ///
    /// Returns `Ok(false)` if the account does not exist or is already revoked.
    async fn revoke(&self, id: i64) -> Result<bool, AppError>;
}
