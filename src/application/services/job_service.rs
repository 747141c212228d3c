//! Job board and job application service.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::domain::eligibility::{MatchThresholds, MatchTier, score_match};
use crate::domain::entities::{
    Job, JobApplication, JobApplicationStatus, JobPatch, JobRequirements, NewJob,
    NewJobApplication,
};
use crate::domain::repositories::{JobApplicationRepository, JobRepository, StudentRepository};
use crate::error::AppError;

use super::profile_service::MAX_CGPA;

/// An open job scored against a student's profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatch {
    pub job: Job,
    pub score: u8,
    pub tier: MatchTier,
}

/// Service for company-owned jobs and the applications made to them.
pub struct JobService<J, A, S>
where
    J: JobRepository,
    A: JobApplicationRepository,
    S: StudentRepository,
{
    jobs: Arc<J>,
    applications: Arc<A>,
    students: Arc<S>,
    thresholds: MatchThresholds,
}

impl<J, A, S> JobService<J, A, S>
where
    J: JobRepository,
    A: JobApplicationRepository,
    S: StudentRepository,
{
    pub fn new(
        jobs: Arc<J>,
        applications: Arc<A>,
        students: Arc<S>,
        thresholds: MatchThresholds,
    ) -> Self {
        Self {
            jobs,
            applications,
            students,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Posts a job for a company. New jobs are open.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the title is empty or the minimum
    /// CGPA is outside the scale.
    pub async fn create_job(
        &self,
        company_id: i64,
        title: String,
        description: Option<String>,
        requirements: JobRequirements,
    ) -> Result<Job, AppError> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::bad_request("Job title cannot be empty", json!({})));
        }

        let job = self
            .jobs
            .create(NewJob {
                company_id,
                title,
                description,
                requirements: normalize_requirements(requirements)?,
            })
            .await?;

        info!(job_id = job.id, company_id, "Job posted");
        Ok(job)
    }

    /// Retrieves a job by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the job does not exist.
    pub async fn get_job(&self, id: i64) -> Result<Job, AppError> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Job not found", json!({ "job_id": id })))
    }

    pub async fn list_jobs(
        &self,
        only_open: bool,
        company_id: Option<i64>,
    ) -> Result<Vec<Job>, AppError> {
        self.jobs.list(only_open, company_id).await
    }

    /// Applies a partial update to a job the company owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the job belongs to another company.
    pub async fn update_job(
        &self,
        company_id: i64,
        job_id: i64,
        mut patch: JobPatch,
    ) -> Result<Job, AppError> {
        let job = self.get_job(job_id).await?;
        if job.company_id != company_id {
            return Err(AppError::forbidden(
                "Job belongs to another company",
                json!({ "job_id": job_id }),
            ));
        }

        if let Some(title) = patch.title.as_mut() {
            *title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::bad_request("Job title cannot be empty", json!({})));
            }
        }
        patch.requirements = patch.requirements.map(normalize_requirements).transpose()?;

        self.jobs.update(job_id, patch).await
    }

    /// Scores every open job against the student's profile.
    ///
    /// Jobs below `min_tier` are dropped; the rest are ordered best first.
    pub async fn job_matches(
        &self,
        student_id: i64,
        min_tier: MatchTier,
    ) -> Result<Vec<JobMatch>, AppError> {
        let Some(profile) = self.students.find(student_id).await? else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<JobMatch> = self
            .jobs
            .list(true, None)
            .await?
            .into_iter()
            .map(|job| {
                let score = score_match(&profile, &job.requirements);
                JobMatch {
                    tier: self.thresholds.tier(score),
                    score,
                    job,
                }
            })
            .filter(|m| m.tier >= min_tier)
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score).then(a.job.id.cmp(&b.job.id)));
        Ok(matches)
    }

    /// Submits a job application with its match score.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the job does not exist
    /// - [`AppError::Precondition`] if the job is closed or the student has
    ///   not graduated
    /// - [`AppError::Conflict`] if the student already applied
    pub async fn apply_to_job(
        &self,
        student_id: i64,
        job_id: i64,
    ) -> Result<JobApplication, AppError> {
        let job = self.get_job(job_id).await?;

        if !job.is_open {
            return Err(AppError::precondition(
                "This job is no longer accepting applications",
                json!({ "job_id": job_id }),
            ));
        }

        let profile = self
            .students
            .find(student_id)
            .await?
            .filter(|p| p.is_graduated())
            .ok_or_else(|| {
                AppError::precondition(
                    "Only graduates may apply for jobs",
                    json!({ "job_id": job_id }),
                )
            })?;

        if self
            .applications
            .find_by_student_and_job(student_id, job_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "You have already applied to this job",
                json!({ "job_id": job_id }),
            ));
        }

        let match_score = score_match(&profile, &job.requirements);

        let application = self
            .applications
            .create(NewJobApplication {
                student_id,
                job_id,
                company_id: job.company_id,
                match_score,
            })
            .await?;

        metrics::counter!("job_applications_total").increment(1);
        info!(
            job_application_id = application.id,
            student_id, job_id, match_score, "Job application submitted"
        );

        Ok(application)
    }

    pub async fn list_student_applications(
        &self,
        student_id: i64,
    ) -> Result<Vec<JobApplication>, AppError> {
        self.applications.list_by_student(student_id).await
    }

    pub async fn list_company_applications(
        &self,
        company_id: i64,
    ) -> Result<Vec<JobApplication>, AppError> {
        self.applications.list_by_company(company_id).await
    }

    /// Records a company's decision on a job application.
    ///
    /// # Errors
    ///
    /// - [`AppError::Forbidden`] if the application was made to another company
    /// - [`AppError::Precondition`] if the transition is not allowed
    pub async fn decide(
        &self,
        company_id: i64,
        application_id: i64,
        next: JobApplicationStatus,
    ) -> Result<JobApplication, AppError> {
        let application = self
            .applications
            .find_by_id(application_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Job application not found",
                    json!({ "job_application_id": application_id }),
                )
            })?;

        if application.company_id != company_id {
            return Err(AppError::forbidden(
                "Job application was made to another company",
                json!({ "job_application_id": application_id }),
            ));
        }

        if !application.status.can_decide(next) {
            return Err(AppError::precondition(
                format!(
                    "Cannot move a job application from {} to {}",
                    application.status, next
                ),
                json!({ "from": application.status, "to": next }),
            ));
        }

        let updated = self
            .applications
            .update_status(application_id, application.status, next)
            .await?;

        metrics::counter!("job_decisions_total", "status" => next.as_str()).increment(1);
        info!(job_application_id = application_id, status = %next, "Job decision recorded");

        Ok(updated)
    }
}

fn normalize_requirements(mut requirements: JobRequirements) -> Result<JobRequirements, AppError> {
    if !(0.0..=MAX_CGPA).contains(&requirements.min_cgpa) {
        return Err(AppError::bad_request(
            format!("Minimum CGPA must be between 0 and {MAX_CGPA}"),
            json!({ "minCGPA": requirements.min_cgpa }),
        ));
    }

    requirements.skills = requirements
        .skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    requirements.experience = requirements.experience.trim().to_string();

    Ok(requirements)
}
