//! Handlers for account administration.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::account::{CreateAccountRequest, CreateAccountResponse};
use crate::api::dto::list::ListResponse;
use crate::domain::entities::{Account, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every account, revoked ones included.
///
/// # Endpoint
///
/// `GET /api/admin/accounts`
pub async fn list_accounts_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Account>,
) -> Result<Json<ListResponse<Account>>, AppError> {
    caller.require_role(Role::Admin)?;

    let accounts = state.auth_service.list_accounts().await?;
    Ok(Json(accounts.into()))
}

/// Creates an account and returns its token.
///
/// # Endpoint
///
/// `POST /api/admin/accounts`
///
/// # Request Body
///
/// ```json
/// { "email": "registrar@nul.ls", "displayName": "NUL Registrar", "role": "institute" }
/// ```
///
/// # Errors
///
/// Returns 400 if the email or display name is invalid.
/// Returns 409 if the email is already registered.
pub async fn create_account_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Account>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<CreateAccountResponse>), AppError> {
    caller.require_role(Role::Admin)?;
    payload.validate()?;

    let (account, token) = state
        .auth_service
        .create_account(&payload.email, &payload.display_name, payload.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateAccountResponse { account, token }),
    ))
}

/// Revokes an account's token.
///
/// # Endpoint
///
/// `DELETE /api/admin/accounts/{id}`
///
/// # Errors
///
/// Returns 400 when an admin tries to revoke their own account.
/// Returns 404 if the account does not exist or is already revoked.
pub async fn revoke_account_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Account>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    caller.require_role(Role::Admin)?;

    if caller.id == id {
        return Err(AppError::bad_request(
            "You cannot revoke your own account",
            serde_json::json!({ "account_id": id }),
        ));
    }

    state.auth_service.revoke_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
