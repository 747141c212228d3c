//! Attempt store trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the attempt store.
#[derive(Debug, thiserror::Error)]
pub enum ThrottleError {
    #[error("Throttle store connection error: {0}")]
    ConnectionError(String),
    #[error("Throttle store operation error: {0}")]
    OperationError(String),
}

/// Result type for attempt store operations.
pub type ThrottleResult<T> = Result<T, ThrottleError>;

/// Shared counter of failed login attempts, keyed by client identifier.
///
/// Counters expire a fixed window after the first failure, so a key is
/// blocked at most for one window. The store must be shared by every
/// instance of the service; a per-process map is not a valid implementation.
///
/// Implementations are fail-open: store errors are logged and reported as
/// zero attempts so an outage never locks every user out.
///
/// # Implementations
///
/// - [`crate::infrastructure::throttle::RedisAttemptStore`] - Redis `INCR` + `EXPIRE`
/// - [`crate::infrastructure::throttle::NullAttemptStore`] - Throttling disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Returns the number of failures recorded for `key` in the current window.
    async fn attempts(&self, key: &str) -> ThrottleResult<u64>;

    /// Records a failure and returns the updated count.
    async fn record_failure(&self, key: &str) -> ThrottleResult<u64>;

    /// Clears the counter after a successful login.
    async fn reset(&self, key: &str) -> ThrottleResult<()>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
