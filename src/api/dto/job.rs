//! DTOs for job endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::eligibility::MatchTier;
use crate::domain::entities::{JobPatch, JobRequirements};

/// Request body for `POST /api/jobs`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 200, message = "Job title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub requirements: JobRequirements,
}

/// Request body for `PATCH /api/jobs/{id}`. Absent fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 200, message = "Job title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub requirements: Option<JobRequirements>,

    pub is_open: Option<bool>,
}

impl From<UpdateJobRequest> for JobPatch {
    fn from(req: UpdateJobRequest) -> Self {
        JobPatch {
            title: req.title,
            description: req.description,
            requirements: req.requirements,
            is_open: req.is_open,
        }
    }
}

/// Query filters for `GET /api/jobs`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub open: Option<bool>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub company_id: Option<i64>,
}

/// Query for `GET /api/jobs/matches`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    /// Lowest tier to include; defaults to `matched`.
    pub min_tier: Option<MatchTier>,
}
