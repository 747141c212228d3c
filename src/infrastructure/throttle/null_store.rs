//! No-op attempt store used when Redis is not configured.

use super::service::{AttemptStore, ThrottleResult};
use async_trait::async_trait;
use tracing::debug;

/// An attempt store that never counts anything, so login throttling is off.
///
/// Used when Redis is not configured or unreachable at startup, and in tests.
pub struct NullAttemptStore;

impl NullAttemptStore {
    pub fn new() -> Self {
        debug!("Using NullAttemptStore (login throttling disabled)");
        Self
    }
}

impl Default for NullAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptStore for NullAttemptStore {
    async fn attempts(&self, _key: &str) -> ThrottleResult<u64> {
        Ok(0)
    }

    async fn record_failure(&self, _key: &str) -> ThrottleResult<u64> {
        Ok(0)
    }

    async fn reset(&self, _key: &str) -> ThrottleResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_store_never_counts() {
        let store = NullAttemptStore::new();
        assert_eq!(store.record_failure("1.2.3.4").await.unwrap(), 0);
        assert_eq!(store.attempts("1.2.3.4").await.unwrap(), 0);
        assert!(store.reset("1.2.3.4").await.is_ok());
        assert!(store.health_check().await);
    }
}
