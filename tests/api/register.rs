use sqlx::{postgres::PgRow, Row};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

#[tokio::test]
async fn register_returns_201_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    test_app.mount_email_provider().await;

    let response = test_app
        .post_register(serde_json::json!({
            "name": "Sarah Weber",
            "email": "sarah@test.com"
        }))
        .await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn register_persists_the_new_coach_with_a_14_day_trial() {
    let test_app = TestApp::spawn_app().await;

    test_app.mount_email_provider().await;

    test_app
        .post_register(serde_json::json!({
            "name": "Sarah Maria Weber",
            "email": "Sarah@Test.com",
            "company": "Weber Coaching"
        }))
        .await;

    let row = sqlx::query(
        r#"
        SELECT email, first_name, last_name, company, status, email_sequence_started,
               EXTRACT(EPOCH FROM (trial_end - trial_start))::bigint AS trial_seconds
        FROM coaches;
        "#,
    )
    .fetch_one(&test_app.db_pool)
    .await
    .expect("Query to fetch coaches failed.");

    assert_eq!(row.get::<String, _>("email"), "sarah@test.com");
    assert_eq!(row.get::<String, _>("first_name"), "Sarah");
    assert_eq!(row.get::<String, _>("last_name"), "Maria Weber");
    assert_eq!(row.get::<String, _>("company"), "Weber Coaching");
    assert_eq!(row.get::<String, _>("status"), "trial_active");
    assert!(row.get::<bool, _>("email_sequence_started"));
    assert_eq!(row.get::<i64, _>("trial_seconds"), 14 * 24 * 60 * 60);
}

#[tokio::test]
async fn register_returns_400_when_a_required_field_is_missing() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        (serde_json::json!({}), "missing body parameters"),
        (
            serde_json::json!({ "name": "Sarah Weber" }),
            "missing email parameter",
        ),
        (
            serde_json::json!({ "email": "sarah@test.com" }),
            "missing name parameter",
        ),
        (
            serde_json::json!({ "name": "", "email": "sarah@test.com" }),
            "name cannot be empty",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_register(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }
}

#[tokio::test]
async fn register_returns_400_when_fields_are_present_but_not_valid() {
    let test_app = TestApp::spawn_app().await;

    let test_cases = vec![
        (
            serde_json::json!({ "name": "{Sarah}", "email": "sarah@test.com" }),
            "invalid name parameter",
        ),
        (
            serde_json::json!({ "name": "Sarah Weber", "email": "test.com" }),
            "invalid email parameter",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_register(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }
}

#[tokio::test]
async fn register_returns_409_when_the_email_is_already_registered() {
    let test_app = TestApp::spawn_app().await;

    test_app.mount_email_provider().await;

    let first_response = test_app
        .post_register(serde_json::json!({
            "name": "Sarah Weber",
            "email": "sarah@test.com"
        }))
        .await;

    assert_eq!(201, first_response.status().as_u16());

    // Same address with different casing must still conflict
    let second_response = test_app
        .post_register(serde_json::json!({
            "name": "Another Sarah",
            "email": "Sarah@Test.COM"
        }))
        .await;

    assert_eq!(409, second_response.status().as_u16());

    let coach_count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM coaches;")
        .map(|row: PgRow| row.get("count"))
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to count coaches failed.");

    assert_eq!(coach_count, 1);
}

#[tokio::test]
async fn register_sends_the_welcome_email_and_records_it() {
    let test_app = TestApp::spawn_app().await;

    test_app.mount_email_provider().await;

    let response = test_app
        .post_register(serde_json::json!({
            "name": "Sarah Weber",
            "email": "sarah@test.com"
        }))
        .await;

    let body: serde_json::Value = response.json().await.expect("Failed to parse response.");

    assert_eq!(body["email_sent"], serde_json::json!(true));
    assert_eq!(body["database_saved"], serde_json::json!(true));
    assert_eq!(body["trial_days_remaining"], serde_json::json!(14));

    let received_requests = &test_app.email_server.received_requests().await.unwrap();
    assert_eq!(received_requests.len(), 1);

    let log_row = sqlx::query(
        "SELECT email_type, status, provider_message_id FROM email_sequence_log;",
    )
    .fetch_one(&test_app.db_pool)
    .await
    .expect("Query to fetch the dispatch log failed.");

    assert_eq!(log_row.get::<String, _>("email_type"), "welcome");
    assert_eq!(log_row.get::<String, _>("status"), "sent");
    assert_eq!(log_row.get::<String, _>("provider_message_id"), "msg_test");

    let last_email_type: Option<String> =
        sqlx::query("SELECT last_email_type_sent FROM coaches;")
            .map(|row: PgRow| row.get("last_email_type_sent"))
            .fetch_one(&test_app.db_pool)
            .await
            .expect("Query to fetch the coach failed.");

    assert_eq!(last_email_type.as_deref(), Some("welcome"));
}

#[tokio::test]
async fn register_succeeds_even_if_the_welcome_email_fails() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post_register(serde_json::json!({
            "name": "Sarah Weber",
            "email": "sarah@test.com"
        }))
        .await;

    assert_eq!(201, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response.");

    assert_eq!(body["email_sent"], serde_json::json!(false));
    assert_eq!(body["database_saved"], serde_json::json!(true));

    // The failed attempt is logged, the sequence state stays untouched so the
    // welcome email is retried by the next batch run
    let log_row = sqlx::query("SELECT email_type, status FROM email_sequence_log;")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to fetch the dispatch log failed.");

    assert_eq!(log_row.get::<String, _>("email_type"), "welcome");
    assert_eq!(log_row.get::<String, _>("status"), "failed");

    let last_email_type: Option<String> =
        sqlx::query("SELECT last_email_type_sent FROM coaches;")
            .map(|row: PgRow| row.get("last_email_type_sent"))
            .fetch_one(&test_app.db_pool)
            .await
            .expect("Query to fetch the coach failed.");

    assert_eq!(last_email_type, None);
}
