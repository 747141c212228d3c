//! Handlers for course applications and admission confirmation.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::application::{ApplicationFilter, DecisionRequest};
use crate::api::dto::list::ListResponse;
use crate::application::services::Confirmation;
use crate::domain::eligibility::EligibilityReport;
use crate::domain::entities::{Account, Application, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Evaluates the caller's profile against a course.
///
/// # Endpoint
///
/// `GET /api/courses/{id}/eligibility`
///
/// A missing profile yields `status: "profile_incomplete"`, not an error.
pub async fn eligibility_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(course_id): Path<i64>,
) -> Result<Json<EligibilityReport>, AppError> {
    account.require_role(Role::Student)?;

    let report = state
        .admission_service
        .check_course_eligibility(account.id, course_id)
        .await?;

    Ok(Json(report))
}

/// Applies to a course.
///
/// # Endpoint
///
/// `POST /api/courses/{id}/applications`
///
/// # Errors
///
/// - 400 if the profile is incomplete
/// - 409 if the student already applied to this course
/// - 422 if admissions are closed, the student is ineligible, the
///   per-institution cap is reached or an admission is already confirmed
pub async fn apply_to_course_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(course_id): Path<i64>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    account.require_role(Role::Student)?;

    let application = state
        .admission_service
        .apply_to_course(account.id, course_id)
        .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// # Endpoint
///
/// `GET /api/students/me/applications`
pub async fn my_applications_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<ListResponse<Application>>, AppError> {
    account.require_role(Role::Student)?;

    let applications = state
        .admission_service
        .list_student_applications(account.id)
        .await?;

    Ok(Json(applications.into()))
}

/// Confirms an admitted application.
///
/// # Endpoint
///
/// `POST /api/applications/{id}/confirm`
///
/// Marks the application confirmed, binds the student's enrollment and
/// withdraws the student's other live applications (depending on the
/// configured scope). Repeating the call is safe.
///
/// # Errors
///
/// - 422 if the application is not admitted, not the caller's, or another
///   admission is already confirmed
/// - 503 if a step keeps failing; `details.committed_steps` lists what was
///   written, and retrying completes the rest
pub async fn confirm_admission_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(application_id): Path<i64>,
) -> Result<Json<Confirmation>, AppError> {
    account.require_role(Role::Student)?;

    let confirmation = state
        .admission_service
        .confirm_admission(account.id, application_id)
        .await?;

    Ok(Json(confirmation))
}

/// Lists applications made to the calling institution.
///
/// # Endpoint
///
/// `GET /api/institutions/me/applications?status=pending`
pub async fn institution_applications_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Query(filter): Query<ApplicationFilter>,
) -> Result<Json<ListResponse<Application>>, AppError> {
    account.require_role(Role::Institute)?;

    let applications = state
        .admission_service
        .list_institution_applications(account.id, filter.status)
        .await?;

    Ok(Json(applications.into()))
}

/// Records an institution's decision.
///
/// # Endpoint
///
/// `PATCH /api/applications/{id}/decision`
///
/// ```json
/// { "status": "admitted" }
/// ```
pub async fn decide_application_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(application_id): Path<i64>,
    Json(payload): Json<DecisionRequest>,
) -> Result<Json<Application>, AppError> {
    account.require_role(Role::Institute)?;

    let application = state
        .admission_service
        .decide(account.id, application_id, payload.status)
        .await?;

    Ok(Json(application))
}
