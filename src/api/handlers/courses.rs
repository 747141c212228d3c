//! Handlers for the course catalogue.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::course::{
    AdmissionStatusRequest, CourseFilter, CreateCourseRequest, UpdateCourseRequest,
};
use crate::api::dto::list::ListResponse;
use crate::domain::entities::{Account, Course, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Lists courses.
///
/// # Endpoint
///
/// `GET /api/courses?open=true&institutionId=3`
pub async fn list_courses_handler(
    State(state): State<AppState>,
    Query(filter): Query<CourseFilter>,
) -> Result<Json<ListResponse<Course>>, AppError> {
    let courses = state
        .course_service
        .list_courses(filter.open.unwrap_or(false), filter.institution_id)
        .await?;

    Ok(Json(courses.into()))
}

/// # Endpoint
///
/// `GET /api/courses/{id}`
pub async fn get_course_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.course_service.get_course(id).await?))
}

/// Creates a course owned by the calling institution. Admissions start closed.
///
/// # Endpoint
///
/// `POST /api/courses`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "BSc Computer Science",
///   "faculty": "Science & Technology",
///   "requirements": {
///     "minimumPoints": 30,
///     "requiredSubjects": ["Mathematics", {"subject": "English", "minimumGrade": "C"}],
///     "minimumGrade": "D"
///   }
/// }
/// ```
pub async fn create_course_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    account.require_role(Role::Institute)?;
    payload.validate()?;

    let course = state
        .course_service
        .create_course(account.id, payload.name, payload.faculty, payload.requirements)
        .await?;

    Ok((StatusCode::CREATED, Json(course)))
}

/// Partially updates a course the institution owns.
///
/// # Endpoint
///
/// `PATCH /api/courses/{id}`
///
/// # Errors
///
/// Returns 403 if the course belongs to another institution.
pub async fn update_course_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, AppError> {
    account.require_role(Role::Institute)?;
    payload.validate()?;

    let course = state
        .course_service
        .update_course(account.id, id, payload.into())
        .await?;

    Ok(Json(course))
}

/// Opens or closes admissions.
///
/// # Endpoint
///
/// `PUT /api/courses/{id}/admission-status`
///
/// ```json
/// { "status": "open" }
/// ```
pub async fn admission_status_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(id): Path<i64>,
    Json(payload): Json<AdmissionStatusRequest>,
) -> Result<Json<Course>, AppError> {
    account.require_role(Role::Institute)?;

    let course = state
        .course_service
        .set_admission_status(account.id, id, payload.status)
        .await?;

    Ok(Json(course))
}
