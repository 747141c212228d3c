//! Job match scoring.
//!
//! The score is a weighted sum of independent sub-checks:
//!
//! | Sub-check | Weight |
//! |---|---|
//! | Graduated (gate) | 20 |
//! | CGPA at or above the job minimum | 30 |
//! | Fraction of required skills held | 30 |
//! | Experience, when the job asks for it | 20 |
//!
//! Applicants who have not graduated score 0 regardless of the rest.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::entities::{JobRequirements, StudentProfile};

pub const EDUCATION_WEIGHT: u32 = 20;
pub const CGPA_WEIGHT: u32 = 30;
pub const SKILLS_WEIGHT: u32 = 30;
pub const EXPERIENCE_WEIGHT: u32 = 20;

/// Score cut points used to filter and label matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchThresholds {
    pub matched: u8,
    pub high: u8,
}

impl MatchThresholds {
    pub const DEFAULT_MATCHED: u8 = 50;
    pub const DEFAULT_HIGH: u8 = 70;

    pub fn tier(&self, score: u8) -> MatchTier {
        if score >= self.high {
            MatchTier::High
        } else if score >= self.matched {
            MatchTier::Matched
        } else {
            MatchTier::None
        }
    }
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            matched: Self::DEFAULT_MATCHED,
            high: Self::DEFAULT_HIGH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    None,
    Matched,
    High,
}

/// Scores how well a student's profile fits a job, in `0..=100`.
pub fn score_match(applicant: &StudentProfile, requirements: &JobRequirements) -> u8 {
    let Some(graduation) = applicant.graduation_info.as_ref().filter(|g| g.graduated) else {
        return 0;
    };

    let mut score = EDUCATION_WEIGHT;

    if graduation.cgpa >= requirements.min_cgpa {
        score += CGPA_WEIGHT;
    }

    score += skills_score(&applicant.skills, &requirements.skills);

    if !requirements.experience_required() || !applicant.work_experience.is_empty() {
        score += EXPERIENCE_WEIGHT;
    }

    score.min(100) as u8
}

/// Share of [`SKILLS_WEIGHT`] earned by the skills the applicant holds.
///
/// Skills compare case-insensitively; a job listing no skills awards the
/// full weight.
fn skills_score(held: &[String], required: &[String]) -> u32 {
    let required: HashSet<String> = required
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if required.is_empty() {
        return SKILLS_WEIGHT;
    }

    let held: HashSet<String> = held.iter().map(|s| s.trim().to_lowercase()).collect();
    let matched = required.intersection(&held).count() as u32;

    SKILLS_WEIGHT * matched / required.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{GraduationInfo, WorkExperience};

    fn graduate(cgpa: f64, skills: &[&str], experience: usize) -> StudentProfile {
        let mut profile = StudentProfile::empty(1);
        profile.graduation_info = Some(GraduationInfo {
            graduated: true,
            cgpa,
            transcript: None,
        });
        profile.skills = skills.iter().map(|s| s.to_string()).collect();
        profile.work_experience = (0..experience)
            .map(|i| WorkExperience {
                company: format!("Company {i}"),
                role: "Intern".to_string(),
                years: Some(1.0),
            })
            .collect();
        profile
    }

    fn job(min_cgpa: f64, skills: &[&str], experience: &str) -> JobRequirements {
        JobRequirements {
            min_cgpa,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: experience.to_string(),
        }
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let applicant = graduate(3.6, &["Rust", "SQL"], 1);
        assert_eq!(score_match(&applicant, &job(3.0, &["rust", "sql"], "1 year")), 100);
    }

    #[test]
    fn test_ungraduated_scores_zero() {
        let mut applicant = graduate(4.0, &["Rust"], 3);
        applicant.graduation_info.as_mut().unwrap().graduated = false;

        assert_eq!(score_match(&applicant, &job(2.0, &["Rust"], "")), 0);
    }

    #[test]
    fn test_missing_graduation_info_scores_zero() {
        let mut applicant = StudentProfile::empty(1);
        applicant.skills = vec!["Rust".to_string()];

        assert_eq!(score_match(&applicant, &job(0.0, &[], "")), 0);
    }

    #[test]
    fn test_partial_skills() {
        let applicant = graduate(3.0, &["Rust"], 0);
        // 20 + 30 + 30*1/3 + 20
        assert_eq!(score_match(&applicant, &job(3.0, &["Rust", "Go", "SQL"], "none")), 80);
    }

    #[test]
    fn test_cgpa_below_minimum() {
        let applicant = graduate(2.5, &["Rust"], 0);
        assert_eq!(score_match(&applicant, &job(3.0, &["Rust"], "")), 70);
    }

    #[test]
    fn test_required_experience_missing() {
        let applicant = graduate(3.5, &[], 0);
        assert_eq!(score_match(&applicant, &job(3.0, &[], "2 years")), 80);
    }

    #[test]
    fn test_more_skills_never_lower_score() {
        let req = job(3.0, &["a", "b", "c", "d"], "1 year");
        let mut previous = 0;
        for n in 0..=4 {
            let skills: Vec<&str> = ["a", "b", "c", "d"][..n].to_vec();
            let score = score_match(&graduate(2.0, &skills, 0), &req);
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_meeting_cgpa_never_lowers_score() {
        let req = job(3.0, &["x"], "");
        let below = score_match(&graduate(2.9, &[], 0), &req);
        let at = score_match(&graduate(3.0, &[], 0), &req);
        assert!(at > below);
    }

    #[test]
    fn test_score_is_deterministic() {
        let applicant = graduate(3.1, &["Rust", "Docker"], 2);
        let req = job(3.0, &["Rust", "Kubernetes"], "1 year");
        assert_eq!(score_match(&applicant, &req), score_match(&applicant, &req));
    }

    #[test]
    fn test_tiers() {
        let t = MatchThresholds::default();
        assert_eq!(t.tier(49), MatchTier::None);
        assert_eq!(t.tier(50), MatchTier::Matched);
        assert_eq!(t.tier(69), MatchTier::Matched);
        assert_eq!(t.tier(70), MatchTier::High);
        assert_eq!(t.tier(100), MatchTier::High);
    }
}
