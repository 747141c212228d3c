use admissions_portal::domain::eligibility::Grade;
use admissions_portal::domain::entities::{
    ApplicationStatus, CourseRequirements, NewAccount, NewApplication, NewCourse, Role,
};
use admissions_portal::domain::repositories::{
    AccountRepository, ApplicationRepository, CourseRepository,
};
use admissions_portal::infrastructure::persistence::{
    PgAccountRepository, PgApplicationRepository, PgCourseRepository,
};
use admissions_portal::AppError;
use sqlx::PgPool;
use std::sync::Arc;

const CAP: i64 = 2;

struct Fixture {
    applications: PgApplicationRepository,
    student: i64,
    first_institution: i64,
    second_institution: i64,
    courses: Vec<(i64, i64)>,
}

async fn account(repo: &PgAccountRepository, email: &str, role: Role) -> i64 {
    repo.create(NewAccount {
        email: email.to_string(),
        display_name: email.to_string(),
        role,
        token_hash: format!("hash-{email}"),
    })
    .await
    .unwrap()
    .id
}

/// One student and two institutions offering two courses each.
async fn fixture(pool: PgPool) -> Fixture {
    let pool = Arc::new(pool);
    let accounts = PgAccountRepository::new(pool.clone());
    let course_repo = PgCourseRepository::new(pool.clone());

    let student = account(&accounts, "s@portal.ls", Role::Student).await;
    let first_institution = account(&accounts, "a@nul.ls", Role::Institute).await;
    let second_institution = account(&accounts, "b@luct.ls", Role::Institute).await;

    let mut courses = Vec::new();
    for (institution_id, name) in [
        (first_institution, "BSc Computer Science"),
        (first_institution, "BSc Statistics"),
        (second_institution, "BSc Software Engineering"),
        (second_institution, "Diploma in ICT"),
    ] {
        let course = course_repo
            .create(NewCourse {
                institution_id,
                name: name.to_string(),
                faculty: None,
                requirements: CourseRequirements {
                    minimum_points: 20,
                    required_subjects: vec![],
                    minimum_grade: Grade::F,
                },
            })
            .await
            .unwrap();
        courses.push((course.id, institution_id));
    }

    Fixture {
        applications: PgApplicationRepository::new(pool),
        student,
        first_institution,
        second_institution,
        courses,
    }
}

fn submission(fx: &Fixture, index: usize) -> NewApplication {
    let (course_id, institution_id) = fx.courses[index];
    NewApplication {
        student_id: fx.student,
        course_id,
        institution_id,
    }
}

async fn apply_all(fx: &Fixture) -> Vec<i64> {
    let mut ids = Vec::new();
    for index in 0..fx.courses.len() {
        let application = fx
            .applications
            .create(submission(fx, index), CAP)
            .await
            .unwrap();
        ids.push(application.id);
    }
    ids
}

#[sqlx::test]
async fn test_create_starts_pending(pool: PgPool) {
    let fx = fixture(pool).await;
    let ids = apply_all(&fx).await;

    let application = fx.applications.find_by_id(ids[0]).await.unwrap().unwrap();
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert!(!application.confirmed_admission);
}

#[sqlx::test]
async fn test_duplicate_application_conflicts(pool: PgPool) {
    let fx = fixture(pool).await;
    apply_all(&fx).await;

    let result = fx.applications.create(submission(&fx, 0), CAP).await;

    assert!(matches!(
        result.unwrap_err(),
        AppError::Conflict { .. }
    ));
}

#[sqlx::test]
async fn test_withdraw_others_globally(pool: PgPool) {
    let fx = fixture(pool).await;
    let ids = apply_all(&fx).await;
    fx.applications
        .update_status(ids[1], ApplicationStatus::Pending, ApplicationStatus::Rejected)
        .await
        .unwrap();

    let withdrawn = fx
        .applications
        .withdraw_others(fx.student, ids[0], None)
        .await
        .unwrap();

    // The rejected application is not live and stays as it is.
    assert_eq!(withdrawn, 2);

    let all = fx.applications.list_by_student(fx.student).await.unwrap();
    for application in all {
        let expected = match application.id {
            id if id == ids[0] => ApplicationStatus::Pending,
            id if id == ids[1] => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Withdrawn,
        };
        assert_eq!(application.status, expected);
    }
}

#[sqlx::test]
async fn test_withdraw_others_within_institution(pool: PgPool) {
    let fx = fixture(pool).await;
    let ids = apply_all(&fx).await;

    let withdrawn = fx
        .applications
        .withdraw_others(fx.student, ids[0], Some(fx.first_institution))
        .await
        .unwrap();
    assert_eq!(withdrawn, 1);

    let second = fx
        .applications
        .list_by_institution(fx.second_institution, Some(ApplicationStatus::Pending))
        .await
        .unwrap();
    assert_eq!(second.len(), 2);

    // Running it again changes nothing.
    let again = fx
        .applications
        .withdraw_others(fx.student, ids[0], Some(fx.first_institution))
        .await
        .unwrap();
    assert_eq!(again, 0);
}

#[sqlx::test]
async fn test_count_excludes_withdrawn(pool: PgPool) {
    let fx = fixture(pool).await;
    let ids = apply_all(&fx).await;

    assert_eq!(
        fx.applications
            .count_by_student_and_institution(fx.student, fx.first_institution)
            .await
            .unwrap(),
        2
    );

    fx.applications
        .update_status(ids[1], ApplicationStatus::Pending, ApplicationStatus::Withdrawn)
        .await
        .unwrap();

    assert_eq!(
        fx.applications
            .count_by_student_and_institution(fx.student, fx.first_institution)
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test]
async fn test_mark_confirmed_is_idempotent(pool: PgPool) {
    let fx = fixture(pool).await;
    let ids = apply_all(&fx).await;

    let first = fx.applications.mark_confirmed(ids[0]).await.unwrap();
    let second = fx.applications.mark_confirmed(ids[0]).await.unwrap();

    assert!(first.confirmed_admission);
    assert!(second.confirmed_admission);

    let confirmed = fx
        .applications
        .find_confirmed_by_student(fx.student)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.id, ids[0]);
}

#[sqlx::test]
async fn test_create_refuses_beyond_cap(pool: PgPool) {
    let fx = fixture(pool).await;
    let first = fx.applications.create(submission(&fx, 0), 1).await.unwrap();

    // Same institution, different course.
    let refused = fx
        .applications
        .create(submission(&fx, 1), 1)
        .await
        .unwrap_err();
    match refused {
        AppError::Precondition { details, .. } => assert_eq!(details["limit"], 1),
        other => panic!("unexpected error: {other:?}"),
    }

    // A withdrawn application frees its slot.
    fx.applications
        .update_status(first.id, ApplicationStatus::Pending, ApplicationStatus::Withdrawn)
        .await
        .unwrap();
    fx.applications.create(submission(&fx, 1), 1).await.unwrap();
}

#[sqlx::test]
async fn test_update_status_does_not_resurrect_withdrawn(pool: PgPool) {
    let fx = fixture(pool).await;
    let ids = apply_all(&fx).await;

    // The institution read ids[2] as pending; a confirmation lands first.
    let seen = fx.applications.find_by_id(ids[2]).await.unwrap().unwrap();
    assert_eq!(seen.status, ApplicationStatus::Pending);
    fx.applications
        .withdraw_others(fx.student, ids[0], None)
        .await
        .unwrap();

    let err = fx
        .applications
        .update_status(ids[2], seen.status, ApplicationStatus::Admitted)
        .await
        .unwrap_err();
    match err {
        AppError::Precondition { details, .. } => {
            assert_eq!(details["current"], "withdrawn");
            assert_eq!(details["expected"], "pending");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let stored = fx.applications.find_by_id(ids[2]).await.unwrap().unwrap();
    assert_eq!(stored.status, ApplicationStatus::Withdrawn);
}

#[sqlx::test]
async fn test_update_status_of_missing_application(pool: PgPool) {
    let fx = fixture(pool).await;

    let err = fx
        .applications
        .update_status(999_999, ApplicationStatus::Pending, ApplicationStatus::Admitted)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
