//! Utility functions shared across layers.
//!
//! - [`token`] - Access token generation
//! - [`client_ip`] - Client key extraction for throttling

pub mod client_ip;
pub mod token;
