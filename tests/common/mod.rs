// Common test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use frostcare_backend::AppData;
use frostcare_backend::api::build_app;
use frostcare_backend::config::{ApplicationSettings, MockEnvironment, SecretManager};
use frostcare_backend::coordinators::OwnerCoordinator;
use frostcare_backend::types::dto::owner::RegisterOwnerRequest;
use frostcare_backend::types::internal::context::RequestContext;
use migration::{Migrator, MigratorTrait};
use poem::Endpoint;
use poem::test::TestClient;
use sea_orm::{Database, DatabaseConnection};
use serde_json::{Value, json};

pub const PASSWORD: &str = "frost2024cool";

/// Environment with valid secrets and every setting at its default
pub fn mock_env() -> MockEnvironment {
    MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", "integration-jwt-secret-with-32-characters"),
        ("REFRESH_TOKEN_SECRET", "integration-refresh-secret-32-characters"),
        ("PASSWORD_PEPPER", "integration-pepper-16"),
    ])
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn setup_app_data() -> Arc<AppData> {
    let env = Arc::new(mock_env());
    let settings = ApplicationSettings::from_env_provider(env.clone()).expect("default settings are valid");
    let secret_manager = Arc::new(SecretManager::init_with_provider(env).expect("mock secrets are valid"));

    Arc::new(AppData::new(setup_test_db().await, settings, secret_manager).expect("Failed to build AppData"))
}

/// HTTP client over the full route tree plus the AppData behind it
pub async fn setup_client() -> (TestClient<impl Endpoint>, Arc<AppData>) {
    let app_data = setup_app_data().await;
    (TestClient::new(build_app(app_data.clone())), app_data)
}

/// Create the first owner (`owner1`) directly through the coordinator, as the CLI does
pub async fn bootstrap_owner(app_data: &Arc<AppData>) -> String {
    let owner = OwnerCoordinator::new(app_data.clone())
        .bootstrap(
            &RequestContext::for_cli("bootstrap-owner"),
            RegisterOwnerRequest {
                first_name: "Meera".to_string(),
                last_name: "Iyer".to_string(),
                email: "owner1@frostcare.in".to_string(),
                phone: "9845000001".to_string(),
                national_id: "500000000001".to_string(),
                address: "14 Residency Road, Bengaluru".to_string(),
                username: "owner1".to_string(),
                password: PASSWORD.to_string(),
                confirm_password: PASSWORD.to_string(),
            },
        )
        .await
        .expect("Failed to bootstrap owner");
    owner.owner_id()
}

pub fn employee_body(n: u32) -> Value {
    json!({
        "first_name": "Ravi",
        "last_name": "Kumar",
        "email": format!("tech{}@frostcare.in", n),
        "phone": format!("98450{:05}", n),
        "national_id": format!("5000{:08}", n),
        "address": "7 Hosur Road, Bengaluru",
        "designation": "Technician",
        "username": format!("tech{}", n),
        "password": PASSWORD,
        "confirm_password": PASSWORD,
    })
}

pub fn customer_fields(n: u32) -> Vec<(&'static str, String)> {
    vec![
        ("first_name", "Asha".to_string()),
        ("last_name", "Rao".to_string()),
        ("email", format!("customer{}@example.com", n)),
        ("phone", format!("98450{:05}", n)),
        ("address", "221 MG Road".to_string()),
        ("city", "Bengaluru".to_string()),
        ("pincode", "560001".to_string()),
        ("username", format!("customer{}", n)),
        ("password", PASSWORD.to_string()),
        ("confirm_password", PASSWORD.to_string()),
    ]
}

pub fn customer_body(n: u32) -> Value {
    let map: serde_json::Map<String, Value> = customer_fields(n)
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v)))
        .collect();
    Value::Object(map)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Log in over HTTP and return the access token
pub async fn login<E: Endpoint>(cli: &TestClient<E>, username: &str) -> String {
    let resp = cli
        .post("/api/auth/login")
        .body_json(&json!({ "username": username, "password": PASSWORD }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("access_token").string().to_string()
}

/// Register employee `tech{n}` as owner1 and return its id
pub async fn register_employee<E: Endpoint>(cli: &TestClient<E>, owner_token: &str, n: u32) -> String {
    let resp = cli
        .post("/api/employees")
        .header("Authorization", bearer(owner_token))
        .body_json(&employee_body(n))
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("employee_id").string().to_string()
}

pub async fn register_customer<E: Endpoint>(cli: &TestClient<E>, n: u32) -> String {
    let resp = cli.post("/api/customers").body_json(&customer_body(n)).send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("customer_id").string().to_string()
}
