//! PostgreSQL implementation of course repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{AdmissionStatus, Course, CoursePatch, CourseRequirements, NewCourse};
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

const COURSE_COLUMNS: &str =
    "id, institution_id, name, faculty, requirements, admission_status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    institution_id: i64,
    name: String,
    faculty: Option<String>,
    requirements: Json<CourseRequirements>,
    admission_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = AppError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let admission_status = row.admission_status.parse().map_err(|reason: String| {
            AppError::internal("Corrupt course row", json!({ "id": row.id, "reason": reason }))
        })?;

        Ok(Course {
            id: row.id,
            institution_id: row.institution_id,
            name: row.name,
            faculty: row.faculty,
            requirements: row.requirements.0,
            admission_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn course_not_found(id: i64) -> AppError {
    AppError::not_found("Course not found", json!({ "course_id": id }))
}

/// PostgreSQL repository for the course catalogue.
pub struct PgCourseRepository {
    pool: Arc<PgPool>,
}

impl PgCourseRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            INSERT INTO courses (institution_id, name, faculty, requirements)
            VALUES ($1, $2, $3, $4)
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(new_course.institution_id)
        .bind(&new_course.name)
        .bind(&new_course.faculty)
        .bind(Json(&new_course.requirements))
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Course::try_from).transpose()
    }

    async fn list(
        &self,
        only_open: bool,
        institution_id: Option<i64>,
    ) -> Result<Vec<Course>, AppError> {
        let rows = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses
            WHERE ($1 = FALSE OR admission_status = 'open')
              AND ($2::BIGINT IS NULL OR institution_id = $2)
            ORDER BY name ASC, id ASC
            "#
        ))
        .bind(only_open)
        .bind(institution_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Course::try_from).collect()
    }

    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses
            SET name = COALESCE($2, name),
                faculty = COALESCE($3, faculty),
                requirements = COALESCE($4, requirements),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.faculty)
        .bind(patch.requirements.map(Json))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| course_not_found(id))?.try_into()
    }

    async fn set_admission_status(
        &self,
        id: i64,
        status: AdmissionStatus,
    ) -> Result<Course, AppError> {
        let row = sqlx::query_as::<_, CourseRow>(&format!(
            r#"
            UPDATE courses
            SET admission_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| course_not_found(id))?.try_into()
    }
}
