//! Course catalogue service.

use std::sync::Arc;

use crate::domain::entities::{AdmissionStatus, Course, CoursePatch, CourseRequirements, NewCourse};
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::info;

use super::profile_service::MAX_POINTS;

/// Service for institution-owned courses.
///
/// Every write checks that the course belongs to the calling institution.
pub struct CourseService<C: CourseRepository> {
    repository: Arc<C>,
}

impl<C: CourseRepository> CourseService<C> {
    pub fn new(repository: Arc<C>) -> Self {
        Self { repository }
    }

    /// Creates a course for an institution. New courses start closed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is empty or the
    /// requirements are malformed.
    /// Returns [`AppError::Conflict`] if the institution already offers a
    /// course with the same name.
    pub async fn create_course(
        &self,
        institution_id: i64,
        name: String,
        faculty: Option<String>,
        requirements: CourseRequirements,
    ) -> Result<Course, AppError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request("Course name cannot be empty", json!({})));
        }
        validate_requirements(&requirements)?;

        let course = self
            .repository
            .create(NewCourse {
                institution_id,
                name,
                faculty: faculty.map(|f| f.trim().to_string()).filter(|f| !f.is_empty()),
                requirements,
            })
            .await?;

        info!(course_id = course.id, institution_id, "Course created");
        Ok(course)
    }

    /// Retrieves a course by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    pub async fn get_course(&self, id: i64) -> Result<Course, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found", json!({ "course_id": id })))
    }

    pub async fn list_courses(
        &self,
        only_open: bool,
        institution_id: Option<i64>,
    ) -> Result<Vec<Course>, AppError> {
        self.repository.list(only_open, institution_id).await
    }

    /// Applies a partial update to a course the institution owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the course belongs to another
    /// institution, [`AppError::NotFound`] if it does not exist.
    pub async fn update_course(
        &self,
        institution_id: i64,
        course_id: i64,
        mut patch: CoursePatch,
    ) -> Result<Course, AppError> {
        self.owned_course(institution_id, course_id).await?;

        if let Some(name) = patch.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::bad_request("Course name cannot be empty", json!({})));
            }
        }
        if let Some(requirements) = &patch.requirements {
            validate_requirements(requirements)?;
        }

        self.repository.update(course_id, patch).await
    }

    /// Opens or closes admissions for a course the institution owns.
    pub async fn set_admission_status(
        &self,
        institution_id: i64,
        course_id: i64,
        status: AdmissionStatus,
    ) -> Result<Course, AppError> {
        self.owned_course(institution_id, course_id).await?;

        let course = self
            .repository
            .set_admission_status(course_id, status)
            .await?;

        info!(course_id, status = %status, "Admission status changed");
        Ok(course)
    }

    async fn owned_course(&self, institution_id: i64, course_id: i64) -> Result<Course, AppError> {
        let course = self.get_course(course_id).await?;
        if course.institution_id != institution_id {
            return Err(AppError::forbidden(
                "Course belongs to another institution",
                json!({ "course_id": course_id }),
            ));
        }
        Ok(course)
    }
}

fn validate_requirements(requirements: &CourseRequirements) -> Result<(), AppError> {
    if !(0..=MAX_POINTS).contains(&requirements.minimum_points) {
        return Err(AppError::bad_request(
            format!("Minimum points must be between 0 and {MAX_POINTS}"),
            json!({ "minimumPoints": requirements.minimum_points }),
        ));
    }

    if requirements
        .required_subjects
        .iter()
        .any(|s| s.subject().trim().is_empty())
    {
        return Err(AppError::bad_request(
            "Required subject names cannot be empty",
            json!({}),
        ));
    }

    Ok(())
}
