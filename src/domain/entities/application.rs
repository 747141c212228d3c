//! Course and job application entities with their status machines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Status of a course application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Pending,
    Admitted,
    Rejected,
    WaitingList,
    /// Taken out of contention after the applicant confirmed another admission.
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Admitted => "admitted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::WaitingList => "waiting-list",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    /// Whether an institution may move an application from `self` to `next`.
    pub fn can_decide(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Admitted | Rejected | WaitingList) | (WaitingList, Admitted | Rejected)
        )
    }

    /// Statuses still competing for a place.
    pub fn is_live(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending | ApplicationStatus::Admitted | ApplicationStatus::WaitingList
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApplicationStatus::Pending),
            "admitted" => Ok(ApplicationStatus::Admitted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "waiting-list" => Ok(ApplicationStatus::WaitingList),
            "withdrawn" => Ok(ApplicationStatus::Withdrawn),
            other => Err(format!("unknown application status '{other}'")),
        }
    }
}

/// A student's application to a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub institution_id: i64,
    pub status: ApplicationStatus,
    pub confirmed_admission: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub student_id: i64,
    pub course_id: i64,
    pub institution_id: i64,
}

impl NewApplication {
    /// Error for a submission that would exceed the per-institution cap.
    pub fn cap_reached(&self, limit: i64) -> AppError {
        AppError::precondition(
            format!("You can apply to at most {limit} courses per institution"),
            json!({ "institution_id": self.institution_id, "limit": limit }),
        )
    }
}

/// Status of a job application, driven by the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobApplicationStatus {
    Pending,
    Shortlisted,
    Rejected,
    Hired,
}

impl JobApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            JobApplicationStatus::Pending => "pending",
            JobApplicationStatus::Shortlisted => "shortlisted",
            JobApplicationStatus::Rejected => "rejected",
            JobApplicationStatus::Hired => "hired",
        }
    }

    pub fn can_decide(self, next: JobApplicationStatus) -> bool {
        use JobApplicationStatus::*;
        matches!(
            (self, next),
            (Pending, Shortlisted | Rejected | Hired) | (Shortlisted, Rejected | Hired)
        )
    }
}

impl fmt::Display for JobApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobApplicationStatus::Pending),
            "shortlisted" => Ok(JobApplicationStatus::Shortlisted),
            "rejected" => Ok(JobApplicationStatus::Rejected),
            "hired" => Ok(JobApplicationStatus::Hired),
            other => Err(format!("unknown job application status '{other}'")),
        }
    }
}

/// A graduate's application to a job posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: i64,
    pub student_id: i64,
    pub job_id: i64,
    pub company_id: i64,
    pub status: JobApplicationStatus,
    pub match_score: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewJobApplication {
    pub student_id: i64,
    pub job_id: i64,
    pub company_id: i64,
    pub match_score: u8,
}
