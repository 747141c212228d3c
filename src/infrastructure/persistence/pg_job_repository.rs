//! PostgreSQL implementation of job repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{Job, JobPatch, JobRequirements, NewJob};
use crate::domain::repositories::JobRepository;
use crate::error::AppError;

const JOB_COLUMNS: &str = "id, company_id, title, description, requirements, is_open, created_at";

#[derive(sqlx::FromRow)]
struct JobRow {
    id: i64,
    company_id: i64,
    title: String,
    description: Option<String>,
    requirements: Json<JobRequirements>,
    is_open: bool,
    created_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            company_id: row.company_id,
            title: row.title,
            description: row.description,
            requirements: row.requirements.0,
            is_open: row.is_open,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for job postings.
pub struct PgJobRepository {
    pool: Arc<PgPool>,
}

impl PgJobRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    async fn create(&self, new_job: NewJob) -> Result<Job, AppError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (company_id, title, description, requirements)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(new_job.company_id)
        .bind(&new_job.title)
        .bind(&new_job.description)
        .bind(Json(&new_job.requirements))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Job>, AppError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Job::from))
    }

    async fn list(&self, only_open: bool, company_id: Option<i64>) -> Result<Vec<Job>, AppError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE ($1 = FALSE OR is_open)
              AND ($2::BIGINT IS NULL OR company_id = $2)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(only_open)
        .bind(company_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn update(&self, id: i64, patch: JobPatch) -> Result<Job, AppError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                requirements = COALESCE($4, requirements),
                is_open = COALESCE($5, is_open)
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.requirements.map(Json))
        .bind(patch.is_open)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Job::from)
            .ok_or_else(|| AppError::not_found("Job not found", json!({ "job_id": id })))
    }
}
