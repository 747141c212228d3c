//! DTOs for the student profile endpoints.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{
    GraduationInfo, HighSchoolRecord, ProfileUpdate, SubjectGrade, WorkExperience,
};

/// Accepted grade symbols, case-insensitive.
static GRADE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?i:a\*|[a-f])\s*$").unwrap());

/// Request body for `PUT /api/students/me/profile`.
///
/// Replaces the editable part of the profile. Omitted sections are cleared.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[validate(nested)]
    pub high_school: Option<HighSchoolInput>,

    #[validate(nested)]
    pub graduation_info: Option<GraduationInput>,

    #[serde(default)]
    #[validate(length(max = 50, message = "At most 50 skills"))]
    pub skills: Vec<String>,

    #[serde(default)]
    #[validate(nested)]
    pub work_experience: Vec<WorkExperienceInput>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HighSchoolInput {
    #[validate(range(min = 0, max = 50, message = "Points must be between 0 and 50"))]
    pub points: i32,

    #[serde(default)]
    #[validate(nested)]
    pub subjects: Vec<SubjectGradeInput>,

    #[validate(range(min = 1950, max = 2100))]
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubjectGradeInput {
    #[validate(length(min = 1, max = 100))]
    pub subject: String,

    #[validate(regex(path = "*GRADE_REGEX", message = "Grade must be one of A*, A, B, C, D, E, F"))]
    pub grade: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GraduationInput {
    pub graduated: bool,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 4.0, message = "CGPA must be between 0 and 4.0"))]
    pub cgpa: f64,

    /// Link to an uploaded transcript; the file itself is stored elsewhere.
    #[validate(url(message = "Transcript must be a valid URL"))]
    pub transcript: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WorkExperienceInput {
    #[validate(length(min = 1, max = 200))]
    pub company: String,

    #[serde(default)]
    pub role: String,

    #[validate(range(min = 0.0, max = 60.0))]
    pub years: Option<f32>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(req: ProfileRequest) -> Self {
        ProfileUpdate {
            high_school: req.high_school.map(|hs| HighSchoolRecord {
                points: hs.points,
                subjects: hs
                    .subjects
                    .into_iter()
                    .map(|s| SubjectGrade::new(s.subject.trim(), s.grade.trim().to_uppercase()))
                    .collect(),
                graduation_year: hs.graduation_year,
            }),
            graduation_info: req.graduation_info.map(|g| GraduationInfo {
                graduated: g.graduated,
                cgpa: g.cgpa,
                transcript: g.transcript,
            }),
            skills: req.skills,
            work_experience: req
                .work_experience
                .into_iter()
                .map(|w| WorkExperience {
                    company: w.company,
                    role: w.role,
                    years: w.years,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ProfileRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_profile() {
        let req = parse(
            r#"{
                "highSchool": {"points": 28, "subjects": [{"subject": "Mathematics", "grade": "b"}, {"subject": "English", "grade": "A*"}]},
                "graduationInfo": {"graduated": true, "cgpa": 3.4, "transcript": "https://files.example.ls/t.pdf"},
                "skills": ["Rust"],
                "workExperience": [{"company": "Vodacom", "role": "Intern", "years": 1}]
            }"#,
        );
        assert!(req.validate().is_ok());

        let update = ProfileUpdate::from(req);
        let record = update.high_school.unwrap();
        assert_eq!(record.subjects[0].grade, "B");
        assert_eq!(record.subjects[1].grade, "A*");
    }

    #[test]
    fn test_unknown_grade_rejected() {
        let req = parse(r#"{"highSchool": {"points": 28, "subjects": [{"subject": "Maths", "grade": "G"}]}}"#);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_points_out_of_range() {
        let req = parse(r#"{"highSchool": {"points": 51}}"#);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_cgpa_out_of_range() {
        let req = parse(r#"{"graduationInfo": {"graduated": true, "cgpa": 4.2}}"#);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_transcript_must_be_url() {
        let req = parse(r#"{"graduationInfo": {"graduated": true, "cgpa": 3.0, "transcript": "not a url"}}"#);
        assert!(req.validate().is_err());
    }
}
