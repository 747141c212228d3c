//! Handlers for job postings and job applications.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::application::JobDecisionRequest;
use crate::api::dto::job::{CreateJobRequest, JobFilter, MatchQuery, UpdateJobRequest};
use crate::api::dto::list::ListResponse;
use crate::application::services::JobMatch;
use crate::domain::eligibility::MatchTier;
use crate::domain::entities::{Account, Job, JobApplication, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Lists jobs.
///
/// # Endpoint
///
/// `GET /api/jobs?open=true&companyId=4`
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<ListResponse<Job>>, AppError> {
    let jobs = state
        .job_service
        .list_jobs(filter.open.unwrap_or(false), filter.company_id)
        .await?;

    Ok(Json(jobs.into()))
}

/// Posts a job for the calling company.
///
/// # Endpoint
///
/// `POST /api/jobs`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Junior Developer",
///   "requirements": { "minCGPA": 3.0, "skills": ["Rust", "SQL"], "experience": "1+ years" }
/// }
/// ```
pub async fn create_job_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    account.require_role(Role::Company)?;
    payload.validate()?;

    let job = state
        .job_service
        .create_job(account.id, payload.title, payload.description, payload.requirements)
        .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// Partially updates a job the company owns, including closing it.
///
/// # Endpoint
///
/// `PATCH /api/jobs/{id}`
pub async fn update_job_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateJobRequest>,
) -> Result<Json<Job>, AppError> {
    account.require_role(Role::Company)?;
    payload.validate()?;

    let job = state
        .job_service
        .update_job(account.id, id, payload.into())
        .await?;

    Ok(Json(job))
}

/// Open jobs scored against the caller's profile, best first.
///
/// # Endpoint
///
/// `GET /api/jobs/matches?minTier=high`
///
/// Defaults to jobs at or above the `matched` threshold.
pub async fn job_matches_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<ListResponse<JobMatch>>, AppError> {
    account.require_role(Role::Student)?;

    let matches = state
        .job_service
        .job_matches(account.id, query.min_tier.unwrap_or(MatchTier::Matched))
        .await?;

    Ok(Json(matches.into()))
}

/// Applies to a job. The match score is computed server-side and stored.
///
/// # Endpoint
///
/// `POST /api/jobs/{id}/applications`
///
/// # Errors
///
/// - 409 if the student already applied
/// - 422 if the job is closed or the student has not graduated
pub async fn apply_to_job_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(job_id): Path<i64>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    account.require_role(Role::Student)?;

    let application = state.job_service.apply_to_job(account.id, job_id).await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// # Endpoint
///
/// `GET /api/students/me/job-applications`
pub async fn my_job_applications_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<ListResponse<JobApplication>>, AppError> {
    account.require_role(Role::Student)?;

    let applications = state
        .job_service
        .list_student_applications(account.id)
        .await?;

    Ok(Json(applications.into()))
}

/// Applications to the calling company's jobs, highest match first.
///
/// # Endpoint
///
/// `GET /api/companies/me/job-applications`
pub async fn company_job_applications_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<ListResponse<JobApplication>>, AppError> {
    account.require_role(Role::Company)?;

    let applications = state
        .job_service
        .list_company_applications(account.id)
        .await?;

    Ok(Json(applications.into()))
}

/// # Endpoint
///
/// `PATCH /api/job-applications/{id}/decision`
pub async fn decide_job_application_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Path(application_id): Path<i64>,
    Json(payload): Json<JobDecisionRequest>,
) -> Result<Json<JobApplication>, AppError> {
    account.require_role(Role::Company)?;

    let application = state
        .job_service
        .decide(account.id, application_id, payload.status)
        .await?;

    Ok(Json(application))
}
