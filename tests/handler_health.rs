mod common;

use serde_json::Value;
use sqlx::PgPool;

#[sqlx::test]
async fn test_health_is_public_and_healthy(pool: PgPool) {
    let server = common::test_server(common::create_test_state(pool));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["throttle_store"]["status"], "ok");
    assert!(json["version"].is_string());
}
