//! Core domain entities representing the portal's data model.
//!
//! Entities are plain data structures; the rules that act on them live in
//! [`crate::domain::eligibility`] and the application services.
//!
//! # Entity Types
//!
//! - [`Account`] - A principal with an explicit [`Role`]
//! - [`StudentProfile`] - Secondary-school results, graduation details, skills
//! - [`Course`] - An institution's course and its [`CourseRequirements`]
//! - [`Job`] - A company's job posting and its [`JobRequirements`]
//! - [`Application`] / [`JobApplication`] - Applications with status machines
//!
//! # Design Pattern
//!
//! Separate structs are used for creation (`NewCourse`, `NewJob`, ...) and for
//! partial updates (`CoursePatch`, `JobPatch`).

pub mod account;
pub mod application;
pub mod course;
pub mod job;
pub mod student;

pub use account::{Account, NewAccount, Role};
pub use application::{
    Application, ApplicationStatus, JobApplication, JobApplicationStatus, NewApplication,
    NewJobApplication,
};
pub use course::{AdmissionStatus, Course, CoursePatch, CourseRequirements, NewCourse, RequiredSubject};
pub use job::{Job, JobPatch, JobRequirements, NewJob};
pub use student::{
    GraduationInfo, HighSchoolRecord, ProfileUpdate, StudentProfile, SubjectGrade, WorkExperience,
};
