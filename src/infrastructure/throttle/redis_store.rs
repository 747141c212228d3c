//! Redis-backed attempt store.

use super::service::{AttemptStore, ThrottleError, ThrottleResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Counts failed logins in Redis so every service instance sees the same totals.
///
/// Each key is incremented with `INCR`; the first increment of a window sets
/// `EXPIRE` so counters disappear on their own.
pub struct RedisAttemptStore {
    client: ConnectionManager,
    window_seconds: u64,
    key_prefix: String,
}

impl RedisAttemptStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`ThrottleError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, window_seconds: u64) -> ThrottleResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            ThrottleError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            ThrottleError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| ThrottleError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            window_seconds,
            key_prefix: "login:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl AttemptStore for RedisAttemptStore {
    async fn attempts(&self, key: &str) -> ThrottleResult<u64> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<u64>>(&redis_key).await {
            Ok(count) => Ok(count.unwrap_or(0)),
            Err(e) => {
                warn!("Redis GET error for {}: {}", redis_key, e);
                Ok(0)
            }
        }
    }

    async fn record_failure(&self, key: &str) -> ThrottleResult<u64> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        let count = match conn.incr::<_, _, u64>(&redis_key, 1).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Redis INCR error for {}: {}", redis_key, e);
                return Ok(0);
            }
        };

        if count == 1
            && let Err(e) = conn
                .expire::<_, ()>(&redis_key, self.window_seconds as i64)
                .await
        {
            warn!("Redis EXPIRE error for {}: {}", redis_key, e);
        }

        debug!("Login failure {} for {}", count, redis_key);
        Ok(count)
    }

    async fn reset(&self, key: &str) -> ThrottleResult<()> {
        let redis_key = self.build_key(key);
        let mut conn = self.client.clone();

        if let Err(e) = conn.del::<_, i32>(&redis_key).await {
            warn!("Redis DEL error for {}: {}", redis_key, e);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
