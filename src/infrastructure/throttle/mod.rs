//! Shared login-attempt counters.
//!
//! Provides an [`AttemptStore`] trait with two implementations:
//! - [`RedisAttemptStore`] - Production store shared by all instances, with TTL
//! - [`NullAttemptStore`] - No-op implementation when throttling is disabled

mod null_store;
mod redis_store;
mod service;

pub use null_store::NullAttemptStore;
pub use redis_store::RedisAttemptStore;
pub use service::{AttemptStore, ThrottleError, ThrottleResult};

#[cfg(test)]
pub use service::MockAttemptStore;
