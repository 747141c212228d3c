//! Account entity and the explicit role carried by every account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;
use serde_json::json;

/// Portal role, fixed when the account is created and stored on the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Institute,
    Student,
    Company,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Institute => "institute",
            Role::Student => "student",
            Role::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "institute" | "institution" => Ok(Role::Institute),
            "student" => Ok(Role::Student),
            "company" => Ok(Role::Company),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// An authenticated principal of the portal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Ensures the account holds `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] naming both roles otherwise.
    pub fn require_role(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::forbidden(
                format!("This action requires the {role} role"),
                json!({ "required": role, "actual": self.role }),
            ))
        }
    }
}

/// Input data for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub token_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role) -> Account {
        Account {
            id: 1,
            email: "user@example.ls".to_string(),
            display_name: "User".to_string(),
            role,
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Admin, Role::Institute, Role::Student, Role::Company] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!("Institution".parse::<Role>().unwrap(), Role::Institute);
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_require_role() {
        let student = account(Role::Student);
        assert!(student.require_role(Role::Student).is_ok());
        assert!(matches!(
            student.require_role(Role::Company),
            Err(AppError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_is_revoked() {
        let mut acc = account(Role::Admin);
        assert!(!acc.is_revoked());
        acc.revoked_at = Some(Utc::now());
        assert!(acc.is_revoked());
    }
}
