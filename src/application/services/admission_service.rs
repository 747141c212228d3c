//! Course applications and the admission resolver.
//!
//! Applications move through
//!
//! ```text
//! pending ──► admitted ──► (confirmed)
//!    │  └───► rejected
//!    └──────► waiting-list ──► admitted | rejected
//! ```
//!
//! Decisions are taken by the institution. Confirmation is taken by the
//! student and runs as a sequence of idempotent store writes, each retried
//! once on transient failure. A confirmation interrupted halfway is
//! completed by calling it again.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{info, warn};

use crate::domain::eligibility::{EligibilityReport, EligibilityStatus, check_eligibility};
use crate::domain::entities::{Application, ApplicationStatus, Course, NewApplication};
use crate::domain::repositories::{ApplicationRepository, CourseRepository, StudentRepository};
use crate::error::AppError;

/// Which of a student's other applications a confirmation withdraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationScope {
    /// Only the confirmed application and the enrollment change.
    Narrow,
    /// Other live applications at the same institution are withdrawn.
    Institution,
    /// Every other live application is withdrawn.
    Global,
}

impl ConfirmationScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfirmationScope::Narrow => "narrow",
            ConfirmationScope::Institution => "institution",
            ConfirmationScope::Global => "global",
        }
    }
}

impl fmt::Display for ConfirmationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfirmationScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" => Ok(ConfirmationScope::Narrow),
            "institution" => Ok(ConfirmationScope::Institution),
            "global" => Ok(ConfirmationScope::Global),
            other => Err(format!(
                "unknown confirmation scope '{other}' (expected narrow, institution or global)"
            )),
        }
    }
}

/// Tunables of the admission workflow.
#[derive(Debug, Clone)]
pub struct AdmissionSettings {
    pub max_applications_per_institution: i64,
    pub confirmation_scope: ConfirmationScope,
    pub retry_backoff: Duration,
}

impl Default for AdmissionSettings {
    fn default() -> Self {
        Self {
            max_applications_per_institution: 2,
            confirmation_scope: ConfirmationScope::Global,
            retry_backoff: Duration::from_millis(200),
        }
    }
}

/// Outcome of a confirmation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub application: Application,
    pub withdrawn: u64,
    pub scope: ConfirmationScope,
}

/// Service for course applications, institution decisions and admission
/// confirmation.
pub struct AdmissionService<A, C, S>
where
    A: ApplicationRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    applications: Arc<A>,
    courses: Arc<C>,
    students: Arc<S>,
    settings: AdmissionSettings,
}

impl<A, C, S> AdmissionService<A, C, S>
where
    A: ApplicationRepository,
    C: CourseRepository,
    S: StudentRepository,
{
    pub fn new(
        applications: Arc<A>,
        courses: Arc<C>,
        students: Arc<S>,
        settings: AdmissionSettings,
    ) -> Self {
        Self {
            applications,
            courses,
            students,
            settings,
        }
    }

    pub fn settings(&self) -> &AdmissionSettings {
        &self.settings
    }

    async fn course(&self, course_id: i64) -> Result<Course, AppError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found", json!({ "course_id": course_id })))
    }

    async fn application(&self, application_id: i64) -> Result<Application, AppError> {
        self.applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Application not found",
                    json!({ "application_id": application_id }),
                )
            })
    }

    /// Evaluates the student's stored profile against a course.
    ///
    /// A student without a profile gets a `profile_incomplete` report, not
    /// an error.
    pub async fn check_course_eligibility(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<EligibilityReport, AppError> {
        let course = self.course(course_id).await?;
        let profile = self.students.find(student_id).await?;

        Ok(check_eligibility(
            profile.as_ref().and_then(|p| p.high_school.as_ref()),
            &course.requirements,
        ))
    }

    /// Submits a course application after re-checking every gate on the server.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the course does not exist
    /// - [`AppError::Precondition`] if admissions are closed, the student has
    ///   already confirmed an admission, the per-institution cap is reached, or
    ///   the student is ineligible (the unmet reasons are in `details`)
    /// - [`AppError::Conflict`] if the student already applied to the course
    /// - [`AppError::Validation`] if the student's profile is incomplete
    pub async fn apply_to_course(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Application, AppError> {
        let course = self.course(course_id).await?;

        if !course.is_open() {
            return Err(AppError::precondition(
                "Admissions are closed for this course",
                json!({ "course_id": course_id }),
            ));
        }

        if self
            .applications
            .find_by_student_and_course(student_id, course_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "You have already applied to this course",
                json!({ "course_id": course_id }),
            ));
        }

        if let Some(confirmed) = self.applications.find_confirmed_by_student(student_id).await? {
            return Err(AppError::precondition(
                "You have already confirmed an admission",
                json!({ "application_id": confirmed.id, "course_id": confirmed.course_id }),
            ));
        }

        let new_application = NewApplication {
            student_id,
            course_id,
            institution_id: course.institution_id,
        };

        // Early answer for the common case; `create` enforces the cap atomically.
        let cap = self.settings.max_applications_per_institution;
        let count = self
            .applications
            .count_by_student_and_institution(student_id, course.institution_id)
            .await?;
        if count >= cap {
            return Err(new_application.cap_reached(cap));
        }

        let profile = self.students.find(student_id).await?;
        let report = check_eligibility(
            profile.as_ref().and_then(|p| p.high_school.as_ref()),
            &course.requirements,
        );
        match report.status {
            EligibilityStatus::Eligible => {}
            EligibilityStatus::ProfileIncomplete => {
                return Err(AppError::bad_request(
                    "Complete your high-school profile before applying",
                    json!({ "reasons": report.unmet_reasons }),
                ));
            }
            EligibilityStatus::Ineligible => {
                return Err(AppError::precondition(
                    "You do not meet the requirements for this course",
                    json!({ "reasons": report.unmet_reasons }),
                ));
            }
        }

        let application = self.applications.create(new_application, cap).await?;

        metrics::counter!("course_applications_total").increment(1);
        info!(
            application_id = application.id,
            student_id, course_id, "Course application submitted"
        );

        Ok(application)
    }

    pub async fn list_student_applications(
        &self,
        student_id: i64,
    ) -> Result<Vec<Application>, AppError> {
        self.applications.list_by_student(student_id).await
    }

    pub async fn list_institution_applications(
        &self,
        institution_id: i64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<Application>, AppError> {
        self.applications
            .list_by_institution(institution_id, status)
            .await
    }

    /// Records an institution's decision on an application.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if the application was made to another institution
    /// - [`AppError::Precondition`] if the transition is not allowed from the
    ///   current status, or the status changed concurrently (for instance a
    ///   confirmation elsewhere withdrew the application)
    pub async fn decide(
        &self,
        institution_id: i64,
        application_id: i64,
        next: ApplicationStatus,
    ) -> Result<Application, AppError> {
        let application = self.application(application_id).await?;

        if application.institution_id != institution_id {
            return Err(AppError::forbidden(
                "Application was made to another institution",
                json!({ "application_id": application_id }),
            ));
        }

        if !application.status.can_decide(next) {
            return Err(AppError::precondition(
                format!(
                    "Cannot move an application from {} to {}",
                    application.status, next
                ),
                json!({ "from": application.status, "to": next }),
            ));
        }

        let updated = self
            .applications
            .update_status(application_id, application.status, next)
            .await?;

        metrics::counter!("admission_decisions_total", "status" => next.as_str()).increment(1);
        info!(application_id, status = %next, "Admission decision recorded");

        Ok(updated)
    }

    /// Confirms an admitted application.
    ///
    /// Runs three idempotent steps: mark the application confirmed, bind the
    /// student's enrollment, withdraw the student's other live applications
    /// within the configured scope. Confirming an already confirmed
    /// application re-runs the steps and converges to the same state.
    ///
    /// # Errors
    ///
    /// - [`AppError::Precondition`] if the application is not the student's,
    ///   is not admitted, or another admission is already confirmed; nothing
    ///   is written
    /// - [`AppError::TransientIo`] if a step keeps failing; `details` lists
    ///   the steps that committed
    pub async fn confirm_admission(
        &self,
        student_id: i64,
        application_id: i64,
    ) -> Result<Confirmation, AppError> {
        let application = self.application(application_id).await?;

        if application.student_id != student_id {
            return Err(AppError::precondition(
                "This application does not belong to you",
                json!({ "application_id": application_id }),
            ));
        }

        if application.status != ApplicationStatus::Admitted {
            return Err(AppError::precondition(
                "Only admitted applications can be confirmed",
                json!({ "application_id": application_id, "status": application.status }),
            ));
        }

        if let Some(confirmed) = self.applications.find_confirmed_by_student(student_id).await?
            && confirmed.id != application_id
        {
            return Err(AppError::precondition(
                "You have already confirmed another admission",
                json!({ "application_id": confirmed.id, "course_id": confirmed.course_id }),
            ));
        }

        let scope = self.settings.confirmation_scope;
        let mut committed: Vec<&'static str> = Vec::with_capacity(3);

        let confirmed = self
            .step("mark_confirmed", &committed, || {
                self.applications.mark_confirmed(application_id)
            })
            .await?;
        committed.push("mark_confirmed");

        self.step("bind_enrollment", &committed, || {
            self.students.set_enrollment(
                student_id,
                application.course_id,
                application.institution_id,
            )
        })
        .await?;
        committed.push("bind_enrollment");

        let withdrawn = match scope {
            ConfirmationScope::Narrow => 0,
            ConfirmationScope::Institution | ConfirmationScope::Global => {
                let institution = (scope == ConfirmationScope::Institution)
                    .then_some(application.institution_id);
                self.step("withdraw_others", &committed, || {
                    self.applications
                        .withdraw_others(student_id, application_id, institution)
                })
                .await?
            }
        };

        metrics::counter!("admissions_confirmed_total").increment(1);
        info!(
            application_id,
            student_id,
            withdrawn,
            scope = %scope,
            "Admission confirmed"
        );

        Ok(Confirmation {
            application: confirmed,
            withdrawn,
            scope,
        })
    }

    /// Runs one resolver step, retrying once after the configured backoff
    /// when the failure is transient.
    async fn step<T, F, Fut>(
        &self,
        name: &'static str,
        committed: &[&'static str],
        action: F,
    ) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let strategy = FixedInterval::new(self.settings.retry_backoff).take(1);

        RetryIf::start(strategy, action, AppError::is_transient)
            .await
            .map_err(|e| {
                if !e.is_transient() {
                    return e;
                }
                warn!(step = name, committed = ?committed, error = %e, "Admission step failed");
                AppError::transient(
                    "Admission confirmation was interrupted; confirm again to finish",
                    json!({
                        "failed_step": name,
                        "committed_steps": committed,
                        "reason": e.to_string(),
                    }),
                )
            })
    }
}
