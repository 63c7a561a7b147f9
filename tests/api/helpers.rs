use reqwest::Response;
use sqlx::{migrate, Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trial_onboarding::{
    config::{get_configuration, DatabaseSettings, Settings},
    startup::{get_connection_db_pool, Application},
};

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub db_pool: PgPool,
    pub email_server: MockServer,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");
        let db_test_name = format!("db_{}", Uuid::new_v4().to_string().replace('-', "_"));
        let email_server = MockServer::start().await;

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.set_email_client_base_url(email_server.uri());

        let db_pool = configure_db(&mut config.database, db_test_name.clone()).await;

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            config: config.clone(),
            db_pool,
            email_server,
        }
    }

    /// Accepts every provider call with a canned message id.
    pub async fn mount_email_provider(&self) {
        Mock::given(path("/emails"))
            .and(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "msg_test" })),
            )
            .mount(&self.email_server)
            .await;
    }

    pub async fn post_register(&self, body: serde_json::Value) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/register", self.address);

        client
            .post(&url)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_sequence_send(&self) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/email-sequence/send", self.address);

        client
            .post(&url)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_manual_send(&self, body: serde_json::Value) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/email-sequence/send-manual", self.address);

        client
            .post(&url)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_preview(&self, query: &str) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/email-sequence/preview?{}", self.address, query);

        client
            .get(&url)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Moves a coach's whole trial window into the past, which is how the
    /// tests travel forward in time.
    pub async fn move_trial_back(&self, coach_email: &str, days: i32) {
        sqlx::query(
            r#"
            UPDATE coaches
            SET trial_start = trial_start - $1 * interval '1 day',
                trial_end = trial_end - $1 * interval '1 day',
                last_email_sent_at = last_email_sent_at - $1 * interval '1 day'
            WHERE email = $2
            "#,
        )
        .bind(days)
        .bind(coach_email)
        .execute(&self.db_pool)
        .await
        .expect("Failed to move the trial window.");
    }
}

async fn configure_db(db_config: &mut DatabaseSettings, db_test_name: String) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&db_config.get_db_options())
        .await
        .expect("Failed to connect to Postgres.");

    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_test_name))
        .await
        .expect("Failed to create database.");

    connection
        .close()
        .await
        .expect("Failed to close connection.");

    // Execute migrations
    db_config.set_name(db_test_name.clone());

    let db_pool = get_connection_db_pool(db_config);

    migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations.");

    println!("Database {} created!!", db_test_name);

    db_pool
}
