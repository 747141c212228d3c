//! Handlers for the student's own profile.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::profile::ProfileRequest;
use crate::domain::entities::{Account, Role, StudentProfile};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the caller's profile; empty if none was submitted yet.
///
/// # Endpoint
///
/// `GET /api/students/me/profile`
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
) -> Result<Json<StudentProfile>, AppError> {
    account.require_role(Role::Student)?;

    let profile = state.profile_service.get_profile(account.id).await?;
    Ok(Json(profile))
}

/// Replaces the caller's profile.
///
/// # Endpoint
///
/// `PUT /api/students/me/profile`
///
/// Enrollment fields are not editable and are preserved.
///
/// # Errors
///
/// Returns 400 if points, grades, CGPA or the transcript URL are invalid.
pub async fn put_profile_handler(
    State(state): State<AppState>,
    Extension(account): Extension<Account>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<StudentProfile>, AppError> {
    account.require_role(Role::Student)?;
    payload.validate()?;

    let profile = state
        .profile_service
        .update_profile(account.id, payload.into())
        .await?;

    Ok(Json(profile))
}
