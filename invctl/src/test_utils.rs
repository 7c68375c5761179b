//! Shared fixtures for HTTP tests: an in-memory application and helpers that create resources
//! through the API.

use axum_test::TestServer;
use serde_json::json;

use crate::api::models::{
    products::ProductResponse, providers::ProviderResponse, stocks::StockResponse, users::UserResponse,
};
use crate::config::{Config, DatabaseConfig};
use crate::types::{ProductId, ProviderId, UserId};

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: None,
        database: DatabaseConfig::Memory,
        enable_otel_export: false,
    }
}

/// A test server over a fresh in-memory store
pub async fn create_test_app() -> TestServer {
    crate::Application::new(create_test_config())
        .await
        .expect("Failed to create application")
        .into_test_server()
}

pub async fn create_test_product(app: &TestServer, code: &str) -> ProductResponse {
    let response = app
        .post("/api/products")
        .json(&json!({"name": format!("Product {code}"), "code": code}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn create_test_user(app: &TestServer, email: &str) -> UserResponse {
    let response = app
        .post("/api/users")
        .json(&json!({"name": email, "email": email, "role": "clerk", "password": "secret"}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

pub async fn create_test_provider(app: &TestServer, email: &str) -> ProviderResponse {
    let response = app
        .post("/api/providers")
        .json(&json!({"name": "Acme", "email": email}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Everything a stock item refers to
pub struct StockFixture {
    pub product_id: ProductId,
    pub provider_id: ProviderId,
    pub creator_id: UserId,
    pub editor_id: UserId,
}

pub async fn create_stock_fixture(app: &TestServer) -> StockFixture {
    let product = create_test_product(app, "LT-1").await;
    let provider = create_test_provider(app, "sales@acme.example.com").await;
    let creator = create_test_user(app, "creator@example.com").await;
    let editor = create_test_user(app, "editor@example.com").await;

    StockFixture {
        product_id: product.id,
        provider_id: provider.id,
        creator_id: creator.id,
        editor_id: editor.id,
    }
}

pub async fn create_test_stock(app: &TestServer, fixture: &StockFixture, serial: &str) -> StockResponse {
    let response = app
        .post("/api/stocks")
        .json(&json!({
            "product_id": fixture.product_id,
            "serial": serial,
            "batch": "B1",
            "provider_id": fixture.provider_id,
            "created_by_user_id": fixture.creator_id,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}
