//! Repository trait for job postings.

use crate::domain::entities::{Job, JobPatch, NewJob};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for job postings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgJobRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, new_job: NewJob) -> Result<Job, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Job>, AppError>;

    /// Lists jobs, optionally only open ones and/or one company's.
    async fn list(&self, only_open: bool, company_id: Option<i64>) -> Result<Vec<Job>, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the job does not exist.
    async fn update(&self, id: i64, patch: JobPatch) -> Result<Job, AppError>;
}
