//! Admission and job eligibility rules.
//!
//! Pure functions over in-memory records: no I/O, no shared state, safe to
//! call from any number of request handlers at once.
//!
//! - [`grade`] - Letter grade scale and point weights
//! - [`course`] - Course eligibility checker
//! - [`job_match`] - Job match scorer and match tiers

pub mod course;
pub mod grade;
pub mod job_match;

pub use course::{EligibilityReport, EligibilityStatus, SubjectCheck, check_eligibility};
pub use grade::{Grade, UnknownGrade, grade_points};
pub use job_match::{MatchThresholds, MatchTier, score_match};
