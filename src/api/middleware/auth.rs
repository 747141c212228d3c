//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::utils::client_ip::client_key;
use crate::{error::AppError, state::AppState};

/// Authenticates requests using per-account Bearer tokens.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer adm_<token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Derive the client key (peer IP, or proxy headers when trusted)
/// 3. Reject with 429 if the client has too many recent failures
/// 4. Resolve the token hash to a non-revoked [`Account`]
/// 5. Insert the account into request extensions for handlers
///
/// Only presented tokens that fail to resolve count as failed attempts.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, or the token is
/// unknown or revoked. Returns `429 Too Many Requests` while the client is
/// throttled.
///
/// [`Account`]: crate::domain::entities::Account
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_key(&req, st.behind_proxy);
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let account = st.auth_service.authenticate(&token, &client).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}
