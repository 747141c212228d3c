//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names are camelCase to match the stored
//! document shapes.

pub mod account;
pub mod application;
pub mod course;
pub mod health;
pub mod job;
pub mod list;
pub mod profile;
