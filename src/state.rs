//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AdmissionService, AuthService, CourseService, JobService, ProfileService,
};
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgAccountRepository, PgApplicationRepository, PgCourseRepository, PgJobApplicationRepository,
    PgJobRepository, PgStudentRepository,
};
use crate::infrastructure::throttle::AttemptStore;

pub type PortalAuthService = AuthService<PgAccountRepository, dyn AttemptStore>;
pub type PortalProfileService = ProfileService<PgStudentRepository>;
pub type PortalCourseService = CourseService<PgCourseRepository>;
pub type PortalAdmissionService =
    AdmissionService<PgApplicationRepository, PgCourseRepository, PgStudentRepository>;
pub type PortalJobService =
    JobService<PgJobRepository, PgJobApplicationRepository, PgStudentRepository>;

/// Services wired to PostgreSQL repositories, cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub auth_service: Arc<PortalAuthService>,
    pub profile_service: Arc<PortalProfileService>,
    pub course_service: Arc<PortalCourseService>,
    pub admission_service: Arc<PortalAdmissionService>,
    pub job_service: Arc<PortalJobService>,
    /// Trust `X-Forwarded-For` when deriving the client key for login throttling.
    pub behind_proxy: bool,
}

impl AppState {
    /// Builds every repository and service over one connection pool.
    pub fn new(pool: Arc<PgPool>, attempts: Arc<dyn AttemptStore>, config: &Config) -> Self {
        let accounts = Arc::new(PgAccountRepository::new(pool.clone()));
        let students = Arc::new(PgStudentRepository::new(pool.clone()));
        let courses = Arc::new(PgCourseRepository::new(pool.clone()));
        let jobs = Arc::new(PgJobRepository::new(pool.clone()));
        let applications = Arc::new(PgApplicationRepository::new(pool.clone()));
        let job_applications = Arc::new(PgJobApplicationRepository::new(pool.clone()));

        let auth_service = Arc::new(AuthService::new(
            accounts,
            attempts,
            config.token_signing_secret.clone(),
            config.login_max_attempts,
        ));
        let profile_service = Arc::new(ProfileService::new(students.clone()));
        let course_service = Arc::new(CourseService::new(courses.clone()));
        let admission_service = Arc::new(AdmissionService::new(
            applications,
            courses,
            students.clone(),
            config.admission_settings(),
        ));
        let job_service = Arc::new(JobService::new(
            jobs,
            job_applications,
            students,
            config.match_thresholds(),
        ));

        Self {
            pool,
            auth_service,
            profile_service,
            course_service,
            admission_service,
            job_service,
            behind_proxy: config.behind_proxy,
        }
    }
}
