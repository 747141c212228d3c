mod common;

use admissions_portal::domain::entities::Role;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::PgPool;

async fn post_job(server: &TestServer, token: &str, title: &str, requirements: Value) -> i64 {
    let response = server
        .post("/api/jobs")
        .add_header("Authorization", common::bearer(token))
        .json(&json!({"title": title, "requirements": requirements}))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

async fn put_profile(server: &TestServer, token: &str, profile: &Value) {
    server
        .put("/api/students/me/profile")
        .add_header("Authorization", common::bearer(token))
        .json(profile)
        .await
        .assert_status_ok();
}

#[sqlx::test]
async fn test_matches_are_scored_and_sorted(pool: PgPool) {
    let state = common::create_test_state(pool);
    let (_, company) = common::create_account(&state, "hr@econet.ls", Role::Company).await;
    let (_, student) = common::create_account(&state, "s@portal.ls", Role::Student).await;
    let server = common::test_server(state);

    // Full match: every criterion satisfied.
    let best = post_job(
        &server,
        &company,
        "Backend Developer",
        json!({"minCGPA": 3.0, "skills": ["Rust", "SQL"], "experience": "1 year"}),
    )
    .await;
    // CGPA too high and one of two skills: 20 + 0 + 15 + 20 = 55.
    let partial = post_job(
        &server,
        &company,
        "Data Analyst",
        json!({"minCGPA": 3.8, "skills": ["SQL", "Python"], "experience": "none"}),
    )
    .await;
    // CGPA too high, no skills held: 20 + 0 + 0 + 20 = 40, below the threshold.
    post_job(
        &server,
        &company,
        "Network Engineer",
        json!({"minCGPA": 3.9, "skills": ["Cisco"]}),
    )
    .await;

    put_profile(&server, &student, &common::strong_profile()).await;

    let response = server
        .get("/api/jobs/matches")
        .add_header("Authorization", common::bearer(&student))
        .await;
    response.assert_status_ok();

    let items = response.json::<Value>()["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["job"]["id"], best);
    assert_eq!(items[0]["score"], 100);
    assert_eq!(items[0]["tier"], "high");
    assert_eq!(items[1]["job"]["id"], partial);
    assert_eq!(items[1]["score"], 55);
    assert_eq!(items[1]["tier"], "matched");

    let high_only = server
        .get("/api/jobs/matches?minTier=high")
        .add_header("Authorization", common::bearer(&student))
        .await
        .json::<Value>();
    assert_eq!(high_only["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test]
async fn test_only_graduates_may_apply(pool: PgPool) {
    let state = common::create_test_state(pool);
    let (_, company) = common::create_account(&state, "hr@econet.ls", Role::Company).await;
    let (_, student) = common::create_account(&state, "s@portal.ls", Role::Student).await;
    let server = common::test_server(state);

    let job = post_job(&server, &company, "Junior Developer", json!({"minCGPA": 2.5})).await;
    put_profile(
        &server,
        &student,
        &json!({"graduationInfo": {"graduated": false, "cgpa": 3.1}}),
    )
    .await;

    let response = server
        .post(&format!("/api/jobs/{job}/applications"))
        .add_header("Authorization", common::bearer(&student))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test]
async fn test_apply_decide_and_close_job(pool: PgPool) {
    let state = common::create_test_state(pool);
    let (_, company) = common::create_account(&state, "hr@econet.ls", Role::Company).await;
    let (_, student) = common::create_account(&state, "s@portal.ls", Role::Student).await;
    let server = common::test_server(state);

    let job = post_job(
        &server,
        &company,
        "Backend Developer",
        json!({"minCGPA": 3.0, "skills": ["Rust"], "experience": "1 year"}),
    )
    .await;
    put_profile(&server, &student, &common::strong_profile()).await;

    let applied = server
        .post(&format!("/api/jobs/{job}/applications"))
        .add_header("Authorization", common::bearer(&student))
        .await;
    applied.assert_status(StatusCode::CREATED);
    let application = applied.json::<Value>();
    assert_eq!(application["matchScore"], 100);
    assert_eq!(application["status"], "pending");

    server
        .post(&format!("/api/jobs/{job}/applications"))
        .add_header("Authorization", common::bearer(&student))
        .await
        .assert_status(StatusCode::CONFLICT);

    let received = server
        .get("/api/companies/me/job-applications")
        .add_header("Authorization", common::bearer(&company))
        .await
        .json::<Value>();
    assert_eq!(received["items"].as_array().unwrap().len(), 1);

    let id = application["id"].as_i64().unwrap();
    let decided = server
        .patch(&format!("/api/job-applications/{id}/decision"))
        .add_header("Authorization", common::bearer(&company))
        .json(&json!({"status": "shortlisted"}))
        .await;
    decided.assert_status_ok();
    assert_eq!(decided.json::<Value>()["status"], "shortlisted");

    server
        .patch(&format!("/api/jobs/{job}"))
        .add_header("Authorization", common::bearer(&company))
        .json(&json!({"isOpen": false}))
        .await
        .assert_status_ok();

    let open_jobs = server
        .get("/api/jobs?open=true")
        .add_header("Authorization", common::bearer(&student))
        .await
        .json::<Value>();
    assert!(open_jobs["items"].as_array().unwrap().is_empty());
}
