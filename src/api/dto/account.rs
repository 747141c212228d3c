//! DTOs for account administration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Account, Role};

/// Request body for `POST /api/admin/accounts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 120, message = "Display name must be 1-120 characters"))]
    pub display_name: String,

    pub role: Role,
}

/// Newly created account with its raw token.
///
/// The token is returned only here; it cannot be retrieved later.
#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub account: Account,
    pub token: String,
}
