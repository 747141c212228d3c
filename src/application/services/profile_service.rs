//! Student profile service.

use std::sync::Arc;

use crate::domain::entities::{ProfileUpdate, StudentProfile};
use crate::domain::repositories::StudentRepository;
use crate::error::AppError;
use serde_json::json;
use tracing::debug;
use url::Url;

/// Highest points total a high-school record can carry.
pub const MAX_POINTS: i32 = 50;

/// Upper bound of the CGPA scale.
pub const MAX_CGPA: f64 = 4.0;

/// Service for reading and editing student profiles.
pub struct ProfileService<S: StudentRepository> {
    repository: Arc<S>,
}

impl<S: StudentRepository> ProfileService<S> {
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    /// Returns the student's profile, or an empty one if none was submitted yet.
    pub async fn get_profile(&self, student_id: i64) -> Result<StudentProfile, AppError> {
        Ok(self
            .repository
            .find(student_id)
            .await?
            .unwrap_or_else(|| StudentProfile::empty(student_id)))
    }

    /// Returns the stored profile without substituting an empty one.
    pub async fn find_profile(&self, student_id: i64) -> Result<Option<StudentProfile>, AppError> {
        self.repository.find(student_id).await
    }

    /// Replaces the editable part of a profile.
    ///
    /// Skills are trimmed and de-duplicated case-insensitively, keeping the
    /// first spelling.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for out-of-range points or CGPA,
    /// duplicate subjects and transcript links that are not http(s).
    pub async fn update_profile(
        &self,
        student_id: i64,
        mut update: ProfileUpdate,
    ) -> Result<StudentProfile, AppError> {
        validate_update(&update)?;
        update.skills = normalize_skills(update.skills);

        debug!(student_id, "Updating student profile");
        self.repository.upsert(student_id, update).await
    }
}

fn validate_update(update: &ProfileUpdate) -> Result<(), AppError> {
    if let Some(record) = &update.high_school {
        if !(0..=MAX_POINTS).contains(&record.points) {
            return Err(AppError::bad_request(
                format!("Points must be between 0 and {MAX_POINTS}"),
                json!({ "points": record.points }),
            ));
        }

        let mut seen: Vec<String> = Vec::with_capacity(record.subjects.len());
        for entry in &record.subjects {
            let key = entry.subject.trim().to_lowercase();
            if key.is_empty() {
                return Err(AppError::bad_request("Subject name cannot be empty", json!({})));
            }
            if seen.contains(&key) {
                return Err(AppError::bad_request(
                    "Subject listed more than once",
                    json!({ "subject": entry.subject }),
                ));
            }
            seen.push(key);
        }
    }

    if let Some(info) = &update.graduation_info {
        if !(0.0..=MAX_CGPA).contains(&info.cgpa) {
            return Err(AppError::bad_request(
                format!("CGPA must be between 0 and {MAX_CGPA}"),
                json!({ "cgpa": info.cgpa }),
            ));
        }
        if let Some(transcript) = &info.transcript {
            validate_transcript(transcript)?;
        }
    }

    Ok(())
}

/// Transcripts are links to uploaded files and must be fetchable over HTTP(S).
fn validate_transcript(transcript: &str) -> Result<(), AppError> {
    match Url::parse(transcript) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
        _ => Err(AppError::bad_request(
            "Transcript must be an http or https link",
            json!({ "transcript": transcript }),
        )),
    }
}

fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(skills.len());
    for skill in skills {
        let skill = skill.trim();
        if skill.is_empty() || out.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            continue;
        }
        out.push(skill.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GraduationInfo, HighSchoolRecord, SubjectGrade};
    use crate::domain::repositories::MockStudentRepository;

    fn update_with(points: i32, cgpa: f64) -> ProfileUpdate {
        ProfileUpdate {
            high_school: Some(HighSchoolRecord {
                points,
                subjects: vec![SubjectGrade::new("Mathematics", "B")],
                graduation_year: Some(2022),
            }),
            graduation_info: Some(GraduationInfo {
                graduated: true,
                cgpa,
                transcript: None,
            }),
            skills: vec![],
            work_experience: vec![],
        }
    }

    #[tokio::test]
    async fn test_get_profile_defaults_to_empty() {
        let mut repo = MockStudentRepository::new();
        repo.expect_find().returning(|_| Ok(None));

        let service = ProfileService::new(Arc::new(repo));
        let profile = service.get_profile(5).await.unwrap();

        assert_eq!(profile.account_id, 5);
        assert!(profile.high_school.is_none());
        assert!(!profile.is_enrolled());
    }

    #[tokio::test]
    async fn test_update_profile_normalizes_skills() {
        let mut repo = MockStudentRepository::new();
        repo.expect_upsert()
            .withf(|id, update| *id == 5 && update.skills == vec!["Rust", "SQL"])
            .times(1)
            .returning(|id, update| {
                let mut profile = StudentProfile::empty(id);
                profile.skills = update.skills;
                Ok(profile)
            });

        let service = ProfileService::new(Arc::new(repo));
        let mut update = update_with(30, 3.2);
        update.skills = vec![
            " Rust ".to_string(),
            "rust".to_string(),
            "".to_string(),
            "SQL".to_string(),
        ];

        let profile = service.update_profile(5, update).await.unwrap();
        assert_eq!(profile.skills, vec!["Rust", "SQL"]);
    }

    #[tokio::test]
    async fn test_update_profile_rejects_out_of_range_points() {
        let service = ProfileService::new(Arc::new(MockStudentRepository::new()));

        let result = service.update_profile(5, update_with(51, 3.0)).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_out_of_range_cgpa() {
        let service = ProfileService::new(Arc::new(MockStudentRepository::new()));

        let result = service.update_profile(5, update_with(30, 4.5)).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_non_http_transcript() {
        let service = ProfileService::new(Arc::new(MockStudentRepository::new()));

        let mut update = update_with(30, 3.0);
        if let Some(info) = update.graduation_info.as_mut() {
            info.transcript = Some("file:///home/student/transcript.pdf".to_string());
        }

        let result = service.update_profile(5, update).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_duplicate_subjects() {
        let service = ProfileService::new(Arc::new(MockStudentRepository::new()));

        let mut update = update_with(30, 3.0);
        if let Some(record) = update.high_school.as_mut() {
            record.subjects.push(SubjectGrade::new(" mathematics", "A"));
        }

        let result = service.update_profile(5, update).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }
}
