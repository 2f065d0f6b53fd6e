use chrono::Utc;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, PgConnection, Connection, Executor};
use std::net::TcpListener;
use uuid::Uuid;
use once_cell::sync::Lazy;
use reqwest::Client;

use score_challenge_backend::run;
use score_challenge_backend::auth::jwt::generate_token;
use score_challenge_backend::config::settings::{get_config, AdminAccount, DatabaseSettings, JwtSettings};
use score_challenge_backend::models::user::{User, UserRole, UserStatus};
use score_challenge_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub admin_username: String,
    pub jwt_secret: String,
}

pub struct UserRegLoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

/// Start the server on a lazy pool that never connects. Enough for every
/// route that answers before touching the database.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = get_config().expect("Failed to read configuration.");
    let connection_pool = PgPoolOptions::new()
        .connect_lazy(configuration.database.connection_string().expose_secret())
        .expect("Failed to create lazy pool");

    start_server(connection_pool, configuration.jwt, None)
}

/// Start the server on a freshly migrated database of its own.
pub async fn spawn_app_with_db() -> TestApp {
    Lazy::force(&TRACING);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;

    let admin_username = format!("admin{}", &Uuid::new_v4().simple().to_string()[..12]);
    start_server(connection_pool, configuration.jwt, Some(admin_username))
}

fn start_server(connection_pool: PgPool, jwt_settings: JwtSettings, admin_username: Option<String>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    let jwt_secret = jwt_settings.secret.expose_secret().to_string();

    let server = run(
        listener,
        connection_pool.clone(),
        jwt_settings,
        Default::default(),
        AdminAccount(admin_username.clone()),
    )
    .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        admin_username: admin_username.unwrap_or_default(),
        jwt_secret,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Sign a token directly, for tests that must not reach the database.
pub fn token_for(app: &TestApp, username: &str, role: UserRole, status: UserStatus) -> String {
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        email: format!("{}@example.com", username),
        username: username.to_string(),
        password_hash: String::new(),
        role: role.to_string(),
        status: status.to_string(),
        created_at: now,
        updated_at: now,
    };
    let settings = JwtSettings::new(app.jwt_secret.clone(), 1);
    generate_token(&user, &settings, now).expect("Failed to sign token")
}

pub async fn register_user(app_address: &str, username: &str, password: &str) -> reqwest::Response {
    Client::new()
        .post(&format!("{}/register_user", app_address))
        .json(&json!({
            "username": username,
            "password": password,
            "email": format!("{}@example.com", username)
        }))
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn login(app_address: &str, username: &str, password: &str) -> reqwest::Response {
    Client::new()
        .post(&format!("{}/login", app_address))
        .json(&json!({
            "username": username,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute login request.")
}

pub async fn register_and_login(app_address: &str, username: &str) -> UserRegLoginResponse {
    let password = "password123";

    let register_response = register_user(app_address, username, password).await;
    assert_eq!(200, register_response.status().as_u16());

    let login_response = login(app_address, username, password).await;
    assert_eq!(200, login_response.status().as_u16());

    let login_body: Value = login_response.json().await.expect("Failed to parse login response");
    let token = login_body["token"].as_str().expect("No token in response").to_string();
    let user_id = parse_user_id_from_jwt_token(&token);

    UserRegLoginResponse {
        token,
        user_id,
        username: username.to_string(),
    }
}

pub async fn create_test_user_and_login(app_address: &str) -> UserRegLoginResponse {
    let username = format!("user{}", &Uuid::new_v4().simple().to_string()[..12]);
    register_and_login(app_address, &username).await
}

/// Read the subject out of a token without verifying it.
pub fn parse_user_id_from_jwt_token(token: &str) -> Uuid {
    let mut validation = jsonwebtoken::Validation::default();
    validation.insecure_disable_signature_validation();
    let data = jsonwebtoken::decode::<Value>(token, &jsonwebtoken::DecodingKey::from_secret(&[]), &validation)
        .expect("Failed to decode token");
    let sub = data.claims["sub"].as_str().expect("No subject in token");
    Uuid::parse_str(sub).expect("Subject is not a uuid")
}

pub async fn make_authenticated_request(
    client: &Client,
    method: reqwest::Method,
    url: &str,
    token: &str,
    body: Option<Value>,
) -> reqwest::Response {
    let mut request = client
        .request(method, url)
        .header("Authorization", format!("Bearer {}", token));

    if let Some(json_body) = body {
        request = request.json(&json_body);
    }

    request.send().await.expect("Failed to execute request.")
}
