//! Student profile entity and its nested documents.
//!
//! Nested documents keep the camelCase field names of the `students`
//! collection so existing records deserialize unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subject and the grade obtained in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectGrade {
    pub subject: String,
    pub grade: String,
}

impl SubjectGrade {
    pub fn new(subject: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.into(),
        }
    }
}

/// Secondary-school results (`highSchool`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighSchoolRecord {
    pub points: i32,
    #[serde(default)]
    pub subjects: Vec<SubjectGrade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
}

impl HighSchoolRecord {
    /// Finds a subject by name, ignoring case and surrounding whitespace.
    pub fn find_subject(&self, name: &str) -> Option<&SubjectGrade> {
        let needle = name.trim();
        self.subjects
            .iter()
            .find(|s| s.subject.trim().eq_ignore_ascii_case(needle))
    }
}

/// Tertiary graduation details (`graduationInfo`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationInfo {
    pub graduated: bool,
    #[serde(default)]
    pub cgpa: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

/// One entry of the `workExperience` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<f32>,
}

/// A student's profile as stored in the `students` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub account_id: i64,
    pub high_school: Option<HighSchoolRecord>,
    pub graduation_info: Option<GraduationInfo>,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperience>,
    pub enrolled_course_id: Option<i64>,
    pub enrolled_institution_id: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl StudentProfile {
    /// Returns an empty profile for an account that has not submitted one yet.
    pub fn empty(account_id: i64) -> Self {
        Self {
            account_id,
            high_school: None,
            graduation_info: None,
            skills: Vec::new(),
            work_experience: Vec::new(),
            enrolled_course_id: None,
            enrolled_institution_id: None,
            updated_at: Utc::now(),
        }
    }

    pub fn is_graduated(&self) -> bool {
        self.graduation_info.as_ref().is_some_and(|g| g.graduated)
    }

    pub fn is_enrolled(&self) -> bool {
        self.enrolled_course_id.is_some()
    }
}

/// Full replacement of the editable part of a profile.
///
/// Enrollment fields are owned by the admission resolver and are not
/// editable here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub high_school: Option<HighSchoolRecord>,
    pub graduation_info: Option<GraduationInfo>,
    pub skills: Vec<String>,
    pub work_experience: Vec<WorkExperience>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_subject_is_case_insensitive() {
        let record = HighSchoolRecord {
            points: 30,
            subjects: vec![SubjectGrade::new("Mathematics", "B")],
            graduation_year: None,
        };

        assert!(record.find_subject("mathematics").is_some());
        assert!(record.find_subject(" MATHEMATICS ").is_some());
        assert!(record.find_subject("English").is_none());
    }

    #[test]
    fn test_high_school_uses_document_field_names() {
        let json = r#"{"points": 28, "subjects": [{"subject": "English", "grade": "C"}], "graduationYear": 2023}"#;
        let record: HighSchoolRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.points, 28);
        assert_eq!(record.graduation_year, Some(2023));
        assert_eq!(record.subjects[0].grade, "C");
    }

    #[test]
    fn test_missing_subjects_defaults_to_empty() {
        let record: HighSchoolRecord = serde_json::from_str(r#"{"points": 10}"#).unwrap();
        assert!(record.subjects.is_empty());
    }

    #[test]
    fn test_is_graduated() {
        let mut profile = StudentProfile::empty(7);
        assert!(!profile.is_graduated());

        profile.graduation_info = Some(GraduationInfo {
            graduated: true,
            cgpa: 3.2,
            transcript: None,
        });
        assert!(profile.is_graduated());
        assert!(!profile.is_enrolled());
    }
}
