//! DTOs for course and job application endpoints.

use serde::Deserialize;

use crate::domain::entities::{ApplicationStatus, JobApplicationStatus};

/// Request body for `PATCH /api/applications/{id}/decision`.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub status: ApplicationStatus,
}

/// Request body for `PATCH /api/job-applications/{id}/decision`.
#[derive(Debug, Deserialize)]
pub struct JobDecisionRequest {
    pub status: JobApplicationStatus,
}

/// Query filters for `GET /api/institutions/me/applications`.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
}
