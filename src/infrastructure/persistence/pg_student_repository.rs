//! PostgreSQL implementation of student repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{
    GraduationInfo, HighSchoolRecord, ProfileUpdate, StudentProfile, WorkExperience,
};
use crate::domain::repositories::StudentRepository;
use crate::error::AppError;

const STUDENT_COLUMNS: &str = "account_id, high_school, graduation_info, skills, work_experience, \
     enrolled_course_id, enrolled_institution_id, updated_at";

#[derive(sqlx::FromRow)]
struct StudentRow {
    account_id: i64,
    high_school: Option<Json<HighSchoolRecord>>,
    graduation_info: Option<Json<GraduationInfo>>,
    skills: Json<Vec<String>>,
    work_experience: Json<Vec<WorkExperience>>,
    enrolled_course_id: Option<i64>,
    enrolled_institution_id: Option<i64>,
    updated_at: DateTime<Utc>,
}

impl From<StudentRow> for StudentProfile {
    fn from(row: StudentRow) -> Self {
        StudentProfile {
            account_id: row.account_id,
            high_school: row.high_school.map(|j| j.0),
            graduation_info: row.graduation_info.map(|j| j.0),
            skills: row.skills.0,
            work_experience: row.work_experience.0,
            enrolled_course_id: row.enrolled_course_id,
            enrolled_institution_id: row.enrolled_institution_id,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL repository for student profiles.
///
/// Nested documents are stored as JSONB with their original field names.
pub struct PgStudentRepository {
    pool: Arc<PgPool>,
}

impl PgStudentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find(&self, account_id: i64) -> Result<Option<StudentProfile>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE account_id = $1"
        ))
        .bind(account_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(StudentProfile::from))
    }

    async fn upsert(
        &self,
        account_id: i64,
        update: ProfileUpdate,
    ) -> Result<StudentProfile, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            r#"
            INSERT INTO students (account_id, high_school, graduation_info, skills, work_experience)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (account_id) DO UPDATE
            SET high_school = EXCLUDED.high_school,
                graduation_info = EXCLUDED.graduation_info,
                skills = EXCLUDED.skills,
                work_experience = EXCLUDED.work_experience,
                updated_at = NOW()
            RETURNING {STUDENT_COLUMNS}
            "#
        ))
        .bind(account_id)
        .bind(update.high_school.map(Json))
        .bind(update.graduation_info.map(Json))
        .bind(Json(update.skills))
        .bind(Json(update.work_experience))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn set_enrollment(
        &self,
        account_id: i64,
        course_id: i64,
        institution_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO students (account_id, enrolled_course_id, enrolled_institution_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (account_id) DO UPDATE
            SET enrolled_course_id = EXCLUDED.enrolled_course_id,
                enrolled_institution_id = EXCLUDED.enrolled_institution_id,
                updated_at = NOW()
            "#,
        )
        .bind(account_id)
        .bind(course_id)
        .bind(institution_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
