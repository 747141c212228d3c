//! Course eligibility checking.

use serde::Serialize;

use super::grade::grade_points;
use crate::domain::entities::{CourseRequirements, HighSchoolRecord};

/// Reason reported when there is nothing to evaluate.
pub const PROFILE_INCOMPLETE: &str = "profile incomplete";

/// Outcome class of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    Ineligible,
    /// No secondary-school record or no subjects on it.
    ProfileIncomplete,
}

/// Per-subject breakdown of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCheck {
    pub subject: String,
    /// Grade held by the applicant, `None` when the subject is missing.
    pub applicant_grade: Option<String>,
    pub required: String,
    pub satisfied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityReport {
    pub eligible: bool,
    pub status: EligibilityStatus,
    pub unmet_reasons: Vec<String>,
    pub per_subject: Vec<SubjectCheck>,
}

impl EligibilityReport {
    fn incomplete() -> Self {
        Self {
            eligible: false,
            status: EligibilityStatus::ProfileIncomplete,
            unmet_reasons: vec![PROFILE_INCOMPLETE.to_string()],
            per_subject: Vec::new(),
        }
    }
}

/// Checks a student's secondary-school record against a course's requirements.
///
/// All unmet requirements are reported, including subject shortfalls when the
/// points check already failed. A missing record, or one without subjects, is
/// reported as [`EligibilityStatus::ProfileIncomplete`] rather than ineligible.
pub fn check_eligibility(
    record: Option<&HighSchoolRecord>,
    requirements: &CourseRequirements,
) -> EligibilityReport {
    let Some(record) = record.filter(|r| !r.subjects.is_empty()) else {
        return EligibilityReport::incomplete();
    };

    let mut unmet_reasons = Vec::new();
    let mut per_subject = Vec::with_capacity(requirements.required_subjects.len());

    if record.points < requirements.minimum_points {
        unmet_reasons.push(format!(
            "insufficient points: required {}, have {}",
            requirements.minimum_points, record.points
        ));
    }

    for required in &requirements.required_subjects {
        let name = required.subject().trim();
        let needed = required.minimum_grade(requirements.minimum_grade);

        match record.find_subject(name) {
            None => {
                unmet_reasons.push(format!("missing: {name}"));
                per_subject.push(SubjectCheck {
                    subject: name.to_string(),
                    applicant_grade: None,
                    required: needed.to_string(),
                    satisfied: false,
                });
            }
            Some(held) => {
                let satisfied = grade_points(&held.grade) >= needed.points();
                if !satisfied {
                    unmet_reasons.push(format!(
                        "grade too low: have {} need {} ({name})",
                        held.grade.trim(),
                        needed
                    ));
                }
                per_subject.push(SubjectCheck {
                    subject: name.to_string(),
                    applicant_grade: Some(held.grade.trim().to_string()),
                    required: needed.to_string(),
                    satisfied,
                });
            }
        }
    }

    let eligible = unmet_reasons.is_empty();

    EligibilityReport {
        eligible,
        status: if eligible {
            EligibilityStatus::Eligible
        } else {
            EligibilityStatus::Ineligible
        },
        unmet_reasons,
        per_subject,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::eligibility::Grade;
    use crate::domain::entities::{RequiredSubject, SubjectGrade};

    fn applicant(points: i32, subjects: &[(&str, &str)]) -> HighSchoolRecord {
        HighSchoolRecord {
            points,
            subjects: subjects
                .iter()
                .map(|(s, g)| SubjectGrade::new(*s, *g))
                .collect(),
            graduation_year: None,
        }
    }

    fn course(min_points: i32, subjects: &[&str], grade: Grade) -> CourseRequirements {
        CourseRequirements {
            minimum_points: min_points,
            required_subjects: subjects.iter().map(|s| RequiredSubject::from(*s)).collect(),
            minimum_grade: grade,
        }
    }

    #[test]
    fn test_eligible_applicant() {
        let student = applicant(28, &[("Mathematics", "B"), ("English", "C")]);
        let req = course(25, &["Mathematics", "English"], Grade::C);

        let report = check_eligibility(Some(&student), &req);

        assert!(report.eligible);
        assert_eq!(report.status, EligibilityStatus::Eligible);
        assert!(report.unmet_reasons.is_empty());
        assert_eq!(report.per_subject.len(), 2);
        assert!(report.per_subject.iter().all(|s| s.satisfied));
    }

    #[test]
    fn test_insufficient_points() {
        let student = applicant(28, &[("Mathematics", "B"), ("English", "C")]);
        let req = course(30, &["Mathematics", "English"], Grade::C);

        let report = check_eligibility(Some(&student), &req);

        assert!(!report.eligible);
        assert_eq!(report.status, EligibilityStatus::Ineligible);
        assert_eq!(report.unmet_reasons.len(), 1);
        assert!(report.unmet_reasons[0].contains("insufficient points"));
        assert!(report.unmet_reasons[0].contains("required 30, have 28"));
    }

    #[test]
    fn test_missing_subject_reported_with_points_ok() {
        let student = applicant(40, &[("English", "A")]);
        let req = course(25, &["Mathematics", "English"], Grade::C);

        let report = check_eligibility(Some(&student), &req);

        assert!(!report.eligible);
        assert_eq!(report.unmet_reasons, vec!["missing: Mathematics".to_string()]);
        assert_eq!(report.per_subject[0].applicant_grade, None);
    }

    #[test]
    fn test_missing_subject_reported_with_points_failing() {
        let student = applicant(10, &[("English", "A")]);
        let req = course(25, &["Mathematics"], Grade::C);

        let report = check_eligibility(Some(&student), &req);

        assert!(!report.eligible);
        assert!(report.unmet_reasons.iter().any(|r| r == "missing: Mathematics"));
        assert!(report.unmet_reasons.iter().any(|r| r.contains("insufficient points")));
    }

    #[test]
    fn test_grade_too_low() {
        let student = applicant(30, &[("Mathematics", "D")]);
        let req = course(25, &["mathematics"], Grade::C);

        let report = check_eligibility(Some(&student), &req);

        assert!(!report.eligible);
        assert_eq!(
            report.unmet_reasons,
            vec!["grade too low: have D need C (mathematics)".to_string()]
        );
        assert!(!report.per_subject[0].satisfied);
    }

    #[test]
    fn test_unknown_applicant_grade_never_satisfies() {
        let student = applicant(30, &[("Mathematics", "Merit")]);
        let req = course(0, &["Mathematics"], Grade::F);

        let report = check_eligibility(Some(&student), &req);

        assert!(!report.eligible);
        assert!(report.unmet_reasons[0].starts_with("grade too low"));
    }

    #[test]
    fn test_per_subject_override_takes_precedence() {
        let student = applicant(30, &[("Mathematics", "C"), ("English", "C")]);
        let req = CourseRequirements {
            minimum_points: 20,
            required_subjects: vec![
                RequiredSubject::WithGrade {
                    subject: "Mathematics".to_string(),
                    minimum_grade: Grade::B,
                },
                RequiredSubject::from("English"),
            ],
            minimum_grade: Grade::D,
        };

        let report = check_eligibility(Some(&student), &req);

        assert!(!report.eligible);
        assert_eq!(report.unmet_reasons.len(), 1);
        assert!(report.unmet_reasons[0].contains("need B"));
        assert_eq!(report.per_subject[1].required, "D");
    }

    #[test]
    fn test_empty_required_subjects_uses_points_only() {
        let student = applicant(25, &[("History", "E")]);
        let req = course(25, &[], Grade::A);

        assert!(check_eligibility(Some(&student), &req).eligible);
    }

    #[test]
    fn test_missing_profile_is_incomplete_not_ineligible() {
        let req = course(0, &[], Grade::F);

        let report = check_eligibility(None, &req);

        assert!(!report.eligible);
        assert_eq!(report.status, EligibilityStatus::ProfileIncomplete);
        assert_eq!(report.unmet_reasons, vec![PROFILE_INCOMPLETE.to_string()]);
    }

    #[test]
    fn test_empty_subject_list_is_incomplete() {
        let student = applicant(50, &[]);
        let req = course(0, &[], Grade::F);

        let report = check_eligibility(Some(&student), &req);

        assert_eq!(report.status, EligibilityStatus::ProfileIncomplete);
    }

    #[test]
    fn test_holding_better_grade_meets_any_lower_minimum() {
        for held in Grade::ALL {
            for minimum in Grade::ALL {
                let student = applicant(50, &[("Physics", held.symbol())]);
                let req = course(0, &["Physics"], minimum);
                let report = check_eligibility(Some(&student), &req);
                assert_eq!(
                    report.eligible,
                    held.points() >= minimum.points(),
                    "held {held}, minimum {minimum}"
                );
            }
        }
    }

    #[test]
    fn test_verdict_independent_of_requirement_order() {
        let student = applicant(30, &[("Mathematics", "B"), ("English", "E"), ("Biology", "A")]);
        let forward = course(20, &["Mathematics", "English", "Biology", "Chemistry"], Grade::C);
        let mut reversed = forward.clone();
        reversed.required_subjects.reverse();

        let a = check_eligibility(Some(&student), &forward);
        let b = check_eligibility(Some(&student), &reversed);

        assert_eq!(a.eligible, b.eligible);
        let mut ra = a.unmet_reasons.clone();
        let mut rb = b.unmet_reasons.clone();
        ra.sort();
        rb.sort();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_check_is_idempotent() {
        let student = applicant(28, &[("Mathematics", "B")]);
        let req = course(25, &["Mathematics", "English"], Grade::C);

        assert_eq!(
            check_eligibility(Some(&student), &req),
            check_eligibility(Some(&student), &req)
        );
    }
}
