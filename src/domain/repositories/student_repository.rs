//! Repository trait for student profiles.

use crate::domain::entities::{ProfileUpdate, StudentProfile};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for student profiles, keyed by account id.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgStudentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Loads a profile.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(StudentProfile))` if the student has submitted a profile
    /// - `Ok(None)` otherwise
    async fn find(&self, account_id: i64) -> Result<Option<StudentProfile>, AppError>;

    /// Creates or replaces the editable part of a profile.
    ///
    /// Enrollment fields are never touched by this call.
    async fn upsert(
        &self,
        account_id: i64,
        update: ProfileUpdate,
    ) -> Result<StudentProfile, AppError>;

    /// Binds the student's enrollment to a course and institution.
    ///
    /// Writing the same binding twice is a no-op.
    async fn set_enrollment(
        &self,
        account_id: i64,
        course_id: i64,
        institution_id: i64,
    ) -> Result<(), AppError>;
}
