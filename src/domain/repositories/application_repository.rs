//! Repository traits for course and job applications.

use crate::domain::entities::{
    Application, ApplicationStatus, JobApplication, JobApplicationStatus, NewApplication,
    NewJobApplication,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for course applications.
///
/// Every write used by the admission resolver is idempotent: repeating it
/// after a partial failure converges to the same stored state.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgApplicationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Creates a `pending` application unless the student already holds
    /// `max_per_institution` non-withdrawn applications at the institution.
    ///
    /// The count and the insert are atomic with respect to other submissions
    /// by the same student.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Precondition`] if the cap is reached and
    /// [`AppError::Conflict`] if the student already applied to the course.
    async fn create(
        &self,
        new_application: NewApplication,
        max_per_institution: i64,
    ) -> Result<Application, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Application>, AppError>;

    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Application>, AppError>;

    /// Returns the student's confirmed application, if any.
    async fn find_confirmed_by_student(
        &self,
        student_id: i64,
    ) -> Result<Option<Application>, AppError>;

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Application>, AppError>;

    async fn list_by_institution(
        &self,
        institution_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, AppError>;

    /// Counts the student's applications to one institution, withdrawn ones excluded.
    async fn count_by_student_and_institution(
        &self,
        student_id: i64,
        institution_id: i64,
    ) -> Result<i64, AppError>;

    /// Moves an application from `expected` to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the application does not exist and
    /// [`AppError::Precondition`] if its status is no longer `expected`.
    async fn update_status(
        &self,
        id: i64,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, AppError>;

    /// Sets `confirmed_admission = true`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the application does not exist.
    async fn mark_confirmed(&self, id: i64) -> Result<Application, AppError>;

    /// Moves the student's other live applications to `withdrawn`.
    ///
    /// Restricted to one institution when `institution_id` is given. Returns the
    /// number of applications changed.
    async fn withdraw_others(
        &self,
        student_id: i64,
        keep_id: i64,
        institution_id: Option<i64>,
    ) -> Result<u64, AppError>;
}

/// Repository interface for job applications.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgJobApplicationRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobApplicationRepository: Send + Sync {
    /// Creates a `pending` job application with its match score.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the student already applied to the job.
    async fn create(
        &self,
        new_application: NewJobApplication,
    ) -> Result<JobApplication, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<JobApplication>, AppError>;

    async fn find_by_student_and_job(
        &self,
        student_id: i64,
        job_id: i64,
    ) -> Result<Option<JobApplication>, AppError>;

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<JobApplication>, AppError>;

    /// Lists a company's applications, best match first.
    async fn list_by_company(&self, company_id: i64) -> Result<Vec<JobApplication>, AppError>;

    /// Moves a job application from `expected` to `next`; same errors as
    /// [`ApplicationRepository::update_status`].
    async fn update_status(
        &self,
        id: i64,
        expected: JobApplicationStatus,
        next: JobApplicationStatus,
    ) -> Result<JobApplication, AppError>;
}
