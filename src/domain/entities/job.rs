//! Job posting entity owned by a company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Requirements of a job posting (`requirements`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(rename = "minCGPA", default)]
    pub min_cgpa: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free text such as `"2 years"`; text without a number means no experience needed.
    #[serde(default)]
    pub experience: String,
}

impl JobRequirements {
    /// First whole number in the experience text, 0 when there is none.
    ///
    /// `"2 years"`, `"At least 2 years"` and `"2+ yrs"` all give 2.
    pub fn experience_threshold(&self) -> u32 {
        self.experience
            .split(|c: char| !c.is_ascii_digit())
            .find(|digits| !digits.is_empty())
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0)
    }

    pub fn experience_required(&self) -> bool {
        self.experience_threshold() > 0
    }
}

/// A job posted by a company.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub requirements: JobRequirements,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for posting a job. New jobs are open.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub company_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub requirements: JobRequirements,
}

/// Partial update of a job posting.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<JobRequirements>,
    pub is_open: Option<bool>,
}
