//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.
//! Role checks happen in the handler, against the [`Account`] the auth
//! middleware placed in request extensions.
//!
//! [`Account`]: crate::domain::entities::Account

pub mod accounts;
pub mod admissions;
pub mod courses;
pub mod health;
pub mod jobs;
pub mod me;
pub mod profile;

pub use accounts::{create_account_handler, list_accounts_handler, revoke_account_handler};
pub use admissions::{
    apply_to_course_handler, confirm_admission_handler, decide_application_handler,
    eligibility_handler, institution_applications_handler, my_applications_handler,
};
pub use courses::{
    admission_status_handler, create_course_handler, get_course_handler, list_courses_handler,
    update_course_handler,
};
pub use health::health_handler;
pub use jobs::{
    apply_to_job_handler, company_job_applications_handler, create_job_handler,
    decide_job_application_handler, job_matches_handler, list_jobs_handler,
    my_job_applications_handler, update_job_handler,
};
pub use me::me_handler;
pub use profile::{get_profile_handler, put_profile_handler};
