//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries. Nested documents live in JSONB columns and are mapped with
//! [`sqlx::types::Json`].
//!
//! # Repositories
//!
//! - [`PgAccountRepository`] - Accounts and token hashes
//! - [`PgStudentRepository`] - Student profiles and enrollment
//! - [`PgCourseRepository`] - Course catalogue
//! - [`PgJobRepository`] - Job postings
//! - [`PgApplicationRepository`] / [`PgJobApplicationRepository`] - Applications

pub mod pg_account_repository;
pub mod pg_application_repository;
pub mod pg_course_repository;
pub mod pg_job_repository;
pub mod pg_student_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_application_repository::{PgApplicationRepository, PgJobApplicationRepository};
pub use pg_course_repository::PgCourseRepository;
pub use pg_job_repository::PgJobRepository;
pub use pg_student_repository::PgStudentRepository;
