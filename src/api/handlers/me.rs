//! Handler for the caller's own account.

use axum::{Extension, Json};

use crate::domain::entities::Account;

/// Returns the authenticated account.
///
/// # Endpoint
///
/// `GET /api/me`
pub async fn me_handler(Extension(account): Extension<Account>) -> Json<Account> {
    Json(account)
}
