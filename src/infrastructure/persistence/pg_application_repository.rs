//! PostgreSQL implementations of the application repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    Application, ApplicationStatus, JobApplication, JobApplicationStatus, NewApplication,
    NewJobApplication,
};
use crate::domain::repositories::{ApplicationRepository, JobApplicationRepository};
use crate::error::AppError;

const APPLICATION_COLUMNS: &str = "id, student_id, course_id, institution_id, status, \
     confirmed_admission, created_at, updated_at";

const JOB_APPLICATION_COLUMNS: &str =
    "id, student_id, job_id, company_id, status, match_score, created_at";

const LIVE_AT_INSTITUTION: &str = r#"
    SELECT COUNT(*)
    FROM applications
    WHERE student_id = $1
      AND institution_id = $2
      AND status <> 'withdrawn'
"#;

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    id: i64,
    student_id: i64,
    course_id: i64,
    institution_id: i64,
    status: String,
    confirmed_admission: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = AppError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|reason: String| {
            AppError::internal(
                "Corrupt application row",
                json!({ "id": row.id, "reason": reason }),
            )
        })?;

        Ok(Application {
            id: row.id,
            student_id: row.student_id,
            course_id: row.course_id,
            institution_id: row.institution_id,
            status,
            confirmed_admission: row.confirmed_admission,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct JobApplicationRow {
    id: i64,
    student_id: i64,
    job_id: i64,
    company_id: i64,
    status: String,
    match_score: i16,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobApplicationRow> for JobApplication {
    type Error = AppError;

    fn try_from(row: JobApplicationRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(|reason: String| {
            AppError::internal(
                "Corrupt job application row",
                json!({ "id": row.id, "reason": reason }),
            )
        })?;

        Ok(JobApplication {
            id: row.id,
            student_id: row.student_id,
            job_id: row.job_id,
            company_id: row.company_id,
            status,
            match_score: row.match_score.clamp(0, 100) as u8,
            created_at: row.created_at,
        })
    }
}

fn application_not_found(id: i64) -> AppError {
    AppError::not_found("Application not found", json!({ "application_id": id }))
}

/// The row changed between the caller's read and its conditional write.
fn stale_status<S: Serialize>(id: i64, expected: S, current: S) -> AppError {
    AppError::precondition(
        "Application status changed before the update was applied",
        json!({ "application_id": id, "expected": expected, "current": current }),
    )
}

/// PostgreSQL repository for course applications.
pub struct PgApplicationRepository {
    pool: Arc<PgPool>,
}

impl PgApplicationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn create(
        &self,
        new_application: NewApplication,
        max_per_institution: i64,
    ) -> Result<Application, AppError> {
        let mut tx = self.pool.begin().await?;

        // Row lock on the applicant: concurrent submissions by one student
        // queue here, so each count sees the inserts committed before it.
        sqlx::query("SELECT id FROM accounts WHERE id = $1 FOR UPDATE")
            .bind(new_application.student_id)
            .execute(&mut *tx)
            .await?;

        let live: i64 = sqlx::query_scalar(LIVE_AT_INSTITUTION)
            .bind(new_application.student_id)
            .bind(new_application.institution_id)
            .fetch_one(&mut *tx)
            .await?;
        if live >= max_per_institution {
            return Err(new_application.cap_reached(max_per_institution));
        }

        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            INSERT INTO applications (student_id, course_id, institution_id)
            VALUES ($1, $2, $3)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(new_application.student_id)
        .bind(new_application.course_id)
        .bind(new_application.institution_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn find_by_student_and_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE student_id = $1 AND course_id = $2
            "#
        ))
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn find_confirmed_by_student(
        &self,
        student_id: i64,
    ) -> Result<Option<Application>, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE student_id = $1 AND confirmed_admission
            "#
        ))
        .bind(student_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Application::try_from).transpose()
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<Application>, AppError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE student_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(student_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn list_by_institution(
        &self,
        institution_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, AppError> {
        let rows = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE institution_id = $1
              AND ($2::TEXT IS NULL OR status = $2)
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(institution_id)
        .bind(status.map(ApplicationStatus::as_str))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Application::try_from).collect()
    }

    async fn count_by_student_and_institution(
        &self,
        student_id: i64,
        institution_id: i64,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(LIVE_AT_INSTITUTION)
            .bind(student_id)
            .bind(institution_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update_status(
        &self,
        id: i64,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> Result<Application, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            UPDATE applications
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let current = self
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| application_not_found(id))?;
                Err(stale_status(id, expected, current.status))
            }
        }
    }

    async fn mark_confirmed(&self, id: i64) -> Result<Application, AppError> {
        let row = sqlx::query_as::<_, ApplicationRow>(&format!(
            r#"
            UPDATE applications
            SET confirmed_admission = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| application_not_found(id))?.try_into()
    }

    async fn withdraw_others(
        &self,
        student_id: i64,
        keep_id: i64,
        institution_id: Option<i64>,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE applications
            SET status = 'withdrawn', updated_at = NOW()
            WHERE student_id = $1
              AND id <> $2
              AND ($3::BIGINT IS NULL OR institution_id = $3)
              AND status IN ('pending', 'admitted', 'waiting-list')
            "#,
        )
        .bind(student_id)
        .bind(keep_id)
        .bind(institution_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}

/// PostgreSQL repository for job applications.
pub struct PgJobApplicationRepository {
    pool: Arc<PgPool>,
}

impl PgJobApplicationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobApplicationRepository for PgJobApplicationRepository {
    async fn create(
        &self,
        new_application: NewJobApplication,
    ) -> Result<JobApplication, AppError> {
        let row = sqlx::query_as::<_, JobApplicationRow>(&format!(
            r#"
            INSERT INTO job_applications (student_id, job_id, company_id, match_score)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_APPLICATION_COLUMNS}
            "#
        ))
        .bind(new_application.student_id)
        .bind(new_application.job_id)
        .bind(new_application.company_id)
        .bind(i16::from(new_application.match_score))
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<JobApplication>, AppError> {
        let row = sqlx::query_as::<_, JobApplicationRow>(&format!(
            "SELECT {JOB_APPLICATION_COLUMNS} FROM job_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(JobApplication::try_from).transpose()
    }

    async fn find_by_student_and_job(
        &self,
        student_id: i64,
        job_id: i64,
    ) -> Result<Option<JobApplication>, AppError> {
        let row = sqlx::query_as::<_, JobApplicationRow>(&format!(
            r#"
            SELECT {JOB_APPLICATION_COLUMNS}
            FROM job_applications
            WHERE student_id = $1 AND job_id = $2
            "#
        ))
        .bind(student_id)
        .bind(job_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(JobApplication::try_from).transpose()
    }

    async fn list_by_student(&self, student_id: i64) -> Result<Vec<JobApplication>, AppError> {
        let rows = sqlx::query_as::<_, JobApplicationRow>(&format!(
            r#"
            SELECT {JOB_APPLICATION_COLUMNS}
            FROM job_applications
            WHERE student_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(student_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(JobApplication::try_from).collect()
    }

    async fn list_by_company(&self, company_id: i64) -> Result<Vec<JobApplication>, AppError> {
        let rows = sqlx::query_as::<_, JobApplicationRow>(&format!(
            r#"
            SELECT {JOB_APPLICATION_COLUMNS}
            FROM job_applications
            WHERE company_id = $1
            ORDER BY match_score DESC, created_at ASC
            "#
        ))
        .bind(company_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(JobApplication::try_from).collect()
    }

    async fn update_status(
        &self,
        id: i64,
        expected: JobApplicationStatus,
        next: JobApplicationStatus,
    ) -> Result<JobApplication, AppError> {
        let row = sqlx::query_as::<_, JobApplicationRow>(&format!(
            r#"
            UPDATE job_applications
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING {JOB_APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => row.try_into(),
            None => {
                let current = self.find_by_id(id).await?.ok_or_else(|| {
                    AppError::not_found(
                        "Job application not found",
                        json!({ "job_application_id": id }),
                    )
                })?;
                Err(stale_status(id, expected, current.status))
            }
        }
    }
}
