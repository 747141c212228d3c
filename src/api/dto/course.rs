//! DTOs for course endpoints.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use crate::domain::entities::{AdmissionStatus, CoursePatch, CourseRequirements};

/// Request body for `POST /api/courses`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Course name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 200))]
    pub faculty: Option<String>,

    pub requirements: CourseRequirements,
}

/// Request body for `PATCH /api/courses/{id}`. Absent fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Course name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 200))]
    pub faculty: Option<String>,

    pub requirements: Option<CourseRequirements>,
}

impl From<UpdateCourseRequest> for CoursePatch {
    fn from(req: UpdateCourseRequest) -> Self {
        CoursePatch {
            name: req.name,
            faculty: req.faculty,
            requirements: req.requirements,
        }
    }
}

/// Request body for `PUT /api/courses/{id}/admission-status`.
#[derive(Debug, Deserialize)]
pub struct AdmissionStatusRequest {
    pub status: AdmissionStatus,
}

/// Query filters for `GET /api/courses`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFilter {
    /// Only courses accepting applications.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub open: Option<bool>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub institution_id: Option<i64>,
}
