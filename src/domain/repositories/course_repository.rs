//! Repository trait for courses.

use crate::domain::entities::{AdmissionStatus, Course, CoursePatch, NewCourse};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the course catalogue.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCourseRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Creates a course in the `closed` admission state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the institution already offers a course
    /// with the same name.
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;

    /// Lists courses, optionally only open ones and/or one institution's.
    async fn list(
        &self,
        only_open: bool,
        institution_id: Option<i64>,
    ) -> Result<Vec<Course>, AppError>;

    /// Applies a partial update to the course body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, AppError>;

    /// Opens or closes admissions independently of the course body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    async fn set_admission_status(
        &self,
        id: i64,
        status: AdmissionStatus,
    ) -> Result<Course, AppError>;
}
