//! Course entity owned by an institution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::eligibility::Grade;

/// Whether a course currently accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Open,
    Closed,
}

impl AdmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AdmissionStatus::Open => "open",
            AdmissionStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(AdmissionStatus::Open),
            "closed" => Ok(AdmissionStatus::Closed),
            other => Err(format!("unknown admission status '{other}'")),
        }
    }
}

/// A subject a course requires.
///
/// Stored either as a bare subject name, which uses the course-wide
/// minimum grade, or as an object carrying its own minimum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredSubject {
    Name(String),
    WithGrade {
        subject: String,
        #[serde(rename = "minimumGrade")]
        minimum_grade: Grade,
    },
}

impl RequiredSubject {
    pub fn subject(&self) -> &str {
        match self {
            RequiredSubject::Name(name) => name,
            RequiredSubject::WithGrade { subject, .. } => subject,
        }
    }

    /// Minimum grade for this subject, falling back to the course default.
    pub fn minimum_grade(&self, default: Grade) -> Grade {
        match self {
            RequiredSubject::Name(_) => default,
            RequiredSubject::WithGrade { minimum_grade, .. } => *minimum_grade,
        }
    }
}

impl From<&str> for RequiredSubject {
    fn from(name: &str) -> Self {
        RequiredSubject::Name(name.to_string())
    }
}

fn lowest_grade() -> Grade {
    Grade::F
}

/// Admission requirements of a course (`requirements`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequirements {
    #[serde(default)]
    pub minimum_points: i32,
    #[serde(default)]
    pub required_subjects: Vec<RequiredSubject>,
    #[serde(default = "lowest_grade")]
    pub minimum_grade: Grade,
}

/// A course offered by an institution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub institution_id: i64,
    pub name: String,
    pub faculty: Option<String>,
    pub requirements: CourseRequirements,
    pub admission_status: AdmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_open(&self) -> bool {
        self.admission_status == AdmissionStatus::Open
    }
}

/// Input data for creating a course. New courses start closed.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub institution_id: i64,
    pub name: String,
    pub faculty: Option<String>,
    pub requirements: CourseRequirements,
}

/// Partial update of a course body. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub name: Option<String>,
    pub faculty: Option<String>,
    pub requirements: Option<CourseRequirements>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_accept_mixed_subject_forms() {
        let json = r#"{
            "minimumPoints": 25,
            "requiredSubjects": ["English", {"subject": "Mathematics", "minimumGrade": "B"}],
            "minimumGrade": "C"
        }"#;
        let req: CourseRequirements = serde_json::from_str(json).unwrap();

        assert_eq!(req.minimum_points, 25);
        assert_eq!(req.required_subjects[0].subject(), "English");
        assert_eq!(req.required_subjects[0].minimum_grade(req.minimum_grade), Grade::C);
        assert_eq!(req.required_subjects[1].subject(), "Mathematics");
        assert_eq!(req.required_subjects[1].minimum_grade(req.minimum_grade), Grade::B);
    }

    #[test]
    fn test_requirements_defaults() {
        let req: CourseRequirements = serde_json::from_str("{}").unwrap();
        assert_eq!(req.minimum_points, 0);
        assert!(req.required_subjects.is_empty());
        assert_eq!(req.minimum_grade, Grade::F);
    }

    #[test]
    fn test_requirements_accept_lowercase_stored_grades() {
        let json = r#"{
            "minimumPoints": 20,
            "requiredSubjects": [{"subject": "Physics", "minimumGrade": "b "}],
            "minimumGrade": "c"
        }"#;
        let req: CourseRequirements = serde_json::from_str(json).unwrap();

        assert_eq!(req.minimum_grade, Grade::C);
        assert_eq!(req.required_subjects[0].minimum_grade(req.minimum_grade), Grade::B);
    }

    #[test]
    fn test_requirements_reject_unknown_grade() {
        let json = r#"{"minimumPoints": 10, "minimumGrade": "Z"}"#;
        assert!(serde_json::from_str::<CourseRequirements>(json).is_err());
    }

    #[test]
    fn test_admission_status_parse() {
        assert_eq!("open".parse::<AdmissionStatus>().unwrap(), AdmissionStatus::Open);
        assert_eq!("closed".parse::<AdmissionStatus>().unwrap(), AdmissionStatus::Closed);
        assert!("paused".parse::<AdmissionStatus>().is_err());
    }
}
