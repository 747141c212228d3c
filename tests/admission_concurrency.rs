mod common;

use admissions_portal::AppError;
use admissions_portal::domain::entities::{ApplicationStatus, Role};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test]
async fn test_concurrent_submissions_respect_institution_cap(pool: PgPool) {
    let state = common::create_test_state(pool);
    let cap = state.admission_service.settings().max_applications_per_institution;
    let (_, institute) = common::create_account(&state, "i@nul.ls", Role::Institute).await;
    let (student, student_token) =
        common::create_account(&state, "s@portal.ls", Role::Student).await;
    let server = common::test_server(state.clone());

    server
        .put("/api/students/me/profile")
        .add_header("Authorization", common::bearer(&student_token))
        .json(&common::strong_profile())
        .await
        .assert_status_ok();

    let mut courses = Vec::new();
    for n in 0..6 {
        courses.push(common::open_course(&server, &institute, &format!("Programme {n}")).await);
    }

    let submissions: Vec<_> = courses
        .into_iter()
        .map(|course_id| {
            let service = state.admission_service.clone();
            tokio::spawn(async move { service.apply_to_course(student.id, course_id).await })
        })
        .collect();

    let mut accepted = 0;
    for submission in submissions {
        match submission.await.unwrap() {
            Ok(application) => {
                assert_eq!(application.status, ApplicationStatus::Pending);
                accepted += 1;
            }
            Err(AppError::Precondition { details, .. }) => {
                assert_eq!(details["limit"], json!(cap));
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(accepted, cap);

    let stored = state
        .admission_service
        .list_student_applications(student.id)
        .await
        .unwrap();
    assert_eq!(stored.len() as i64, cap);
}
