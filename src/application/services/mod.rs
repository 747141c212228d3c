//! Business logic services for the application layer.

pub mod admission_service;
pub mod auth_service;
pub mod course_service;
pub mod job_service;
pub mod profile_service;

pub use admission_service::{AdmissionService, AdmissionSettings, Confirmation, ConfirmationScope};
pub use auth_service::AuthService;
pub use course_service::CourseService;
pub use job_service::{JobMatch, JobService};
pub use profile_service::ProfileService;
