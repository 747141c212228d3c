//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and shared counters.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`throttle`] - Login-attempt counters (Redis and no-op implementations)

pub mod persistence;
pub mod throttle;
