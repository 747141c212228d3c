//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]. Role checks are done per handler.

use crate::api::handlers::{
    admission_status_handler, apply_to_course_handler, apply_to_job_handler,
    company_job_applications_handler, confirm_admission_handler, create_account_handler,
    create_course_handler, create_job_handler, decide_application_handler,
    decide_job_application_handler, eligibility_handler, get_course_handler, get_profile_handler,
    institution_applications_handler, job_matches_handler, list_accounts_handler,
    list_courses_handler, list_jobs_handler, me_handler, my_applications_handler,
    my_job_applications_handler, put_profile_handler, revoke_account_handler,
    update_course_handler, update_job_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// Any role:
/// - `GET    /me`                              - The authenticated account
/// - `GET    /courses`                         - List courses
/// - `GET    /courses/{id}`                    - Course details
/// - `GET    /jobs`                            - List jobs
///
/// Student:
/// - `GET    /students/me/profile`             - Own profile
/// - `PUT    /students/me/profile`             - Replace own profile
/// - `GET    /courses/{id}/eligibility`        - Eligibility report
/// - `POST   /courses/{id}/applications`       - Apply to a course
/// - `GET    /students/me/applications`        - Own course applications
/// - `POST   /applications/{id}/confirm`       - Confirm an admission
/// - `GET    /jobs/matches`                    - Scored open jobs
/// - `POST   /jobs/{id}/applications`          - Apply to a job
/// - `GET    /students/me/job-applications`    - Own job applications
///
/// Institute:
/// - `POST   /courses`                         - Create a course
/// - `PATCH  /courses/{id}`                    - Update a course
/// - `PUT    /courses/{id}/admission-status`   - Open or close admissions
/// - `GET    /institutions/me/applications`    - Applications received
/// - `PATCH  /applications/{id}/decision`      - Admit, waitlist or reject
///
/// Company:
/// - `POST   /jobs`                            - Post a job
/// - `PATCH  /jobs/{id}`                       - Update or close a job
/// - `GET    /companies/me/job-applications`   - Applications received
/// - `PATCH  /job-applications/{id}/decision`  - Shortlist, reject or hire
///
/// Admin:
/// - `GET    /admin/accounts`                  - List accounts
/// - `POST   /admin/accounts`                  - Create an account and token
/// - `DELETE /admin/accounts/{id}`             - Revoke an account
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me_handler))
        .route(
            "/students/me/profile",
            get(get_profile_handler).put(put_profile_handler),
        )
        .route("/students/me/applications", get(my_applications_handler))
        .route(
            "/students/me/job-applications",
            get(my_job_applications_handler),
        )
        .route(
            "/courses",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/courses/{id}",
            get(get_course_handler).patch(update_course_handler),
        )
        .route(
            "/courses/{id}/admission-status",
            put(admission_status_handler),
        )
        .route("/courses/{id}/eligibility", get(eligibility_handler))
        .route("/courses/{id}/applications", post(apply_to_course_handler))
        .route(
            "/institutions/me/applications",
            get(institution_applications_handler),
        )
        .route(
            "/applications/{id}/decision",
            patch(decide_application_handler),
        )
        .route("/applications/{id}/confirm", post(confirm_admission_handler))
        .route("/jobs", get(list_jobs_handler).post(create_job_handler))
        .route("/jobs/matches", get(job_matches_handler))
        .route("/jobs/{id}", patch(update_job_handler))
        .route("/jobs/{id}/applications", post(apply_to_job_handler))
        .route(
            "/companies/me/job-applications",
            get(company_job_applications_handler),
        )
        .route(
            "/job-applications/{id}/decision",
            patch(decide_job_application_handler),
        )
        .route(
            "/admin/accounts",
            get(list_accounts_handler).post(create_account_handler),
        )
        .route("/admin/accounts/{id}", delete(revoke_account_handler))
}
