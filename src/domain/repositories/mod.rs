//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AccountRepository`] - Accounts, roles and token hashes
//! - [`StudentRepository`] - Student profiles and enrollment
//! - [`CourseRepository`] - Course catalogue
//! - [`JobRepository`] - Job postings
//! - [`ApplicationRepository`] - Course applications
//! - [`JobApplicationRepository`] - Job applications

pub mod account_repository;
pub mod application_repository;
pub mod course_repository;
pub mod job_repository;
pub mod student_repository;

pub use account_repository::AccountRepository;
pub use application_repository::{ApplicationRepository, JobApplicationRepository};
pub use course_repository::CourseRepository;
pub use job_repository::JobRepository;
pub use student_repository::StudentRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use application_repository::{MockApplicationRepository, MockJobApplicationRepository};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
