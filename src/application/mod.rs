//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Bearer token authentication and accounts
//! - [`services::profile_service::ProfileService`] - Student profiles
//! - [`services::course_service::CourseService`] - Course catalogue
//! - [`services::admission_service::AdmissionService`] - Course applications and confirmation
//! - [`services::job_service::JobService`] - Job board, matching and job applications

pub mod services;
