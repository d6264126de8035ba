use std::sync::Arc;

use axum::http::{
    HeaderValue, StatusCode,
    header::{AUTHORIZATION, WWW_AUTHENTICATE},
};
use axum_test::TestServer;
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{Value, json};
use uuid::Uuid;

use queso_shop::router::build_router;
use queso_shop::state::AppState;
use queso_shop_schema::users;
use queso_testing::auth::{bearer_value, cheap_credentials, test_token_service};

fn user_row(email: &str, role: &str) -> users::Model {
    users::Model {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        name: "Ana".into(),
        role: role.to_owned(),
        password_hash: "$argon2id$unused".into(),
        addresses: json!([]),
        created_at: Utc::now(),
    }
}

/// Router backed by a mock store that answers queries with `user_rows`, in order.
fn server(user_rows: Vec<Vec<users::Model>>) -> TestServer {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(user_rows)
        .into_connection();
    let state = AppState {
        db: Arc::new(db),
        tokens: test_token_service(),
        credentials: cheap_credentials(),
    };
    TestServer::new(build_router(state, &["http://localhost".to_owned()])).unwrap()
}

fn product_body() -> Value {
    json!({"nombre": "Gouda", "precio": 5990.0, "stock": 4, "leche": "vaca"})
}

// ── Public routes ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_serve_banner_at_root() {
    let response = server(vec![]).get("/").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"proyecto": "API de Queso & Sabor v1.0"})
    );
}

#[tokio::test]
async fn should_report_liveness() {
    server(vec![]).get("/healthz").await.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_attach_request_id() {
    let response = server(vec![]).get("/healthz").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_reject_malformed_product_id_before_touching_store() {
    let response = server(vec![]).get("/productos/not-an-id").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_ID");
}

// ── POST /productos access chain ─────────────────────────────────────────────

#[tokio::test]
async fn should_return_401_without_token() {
    let response = server(vec![])
        .post("/productos")
        .json(&product_body())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHORIZED");
}

#[tokio::test]
async fn should_return_401_for_garbage_token() {
    let response = server(vec![])
        .post("/productos")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not.a.jwt"))
        .json(&product_body())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_403_for_cliente_token() {
    let tokens = test_token_service();
    let response = server(vec![vec![user_row("ana@example.com", "CLIENTE")]])
        .post("/productos")
        .add_header(AUTHORIZATION, bearer_value(&tokens, "ana@example.com"))
        .json(&product_body())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.json::<Value>()["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_return_401_when_token_subject_is_unknown() {
    let tokens = test_token_service();
    let response = server(vec![vec![]])
        .post("/productos")
        .add_header(AUTHORIZATION, bearer_value(&tokens, "gone@example.com"))
        .json(&product_body())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ── GET /users/me ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_profile_without_password_hash() {
    let tokens = test_token_service();
    let response = server(vec![vec![user_row("ana@example.com", "CLIENTE")]])
        .get("/users/me")
        .add_header(AUTHORIZATION, bearer_value(&tokens, "ana@example.com"))
        .await;
    response.assert_status(StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(
        body,
        json!({"email": "ana@example.com", "nombre": "Ana", "direcciones": [], "rol": "CLIENTE"})
    );
}

// ── POST /pedidos/simular_pago ───────────────────────────────────────────────

#[tokio::test]
async fn should_reject_malformed_order_id() {
    let tokens = test_token_service();
    let response = server(vec![vec![user_row("ana@example.com", "CLIENTE")]])
        .post("/pedidos/simular_pago")
        .add_query_param("orderId", "123")
        .add_query_param("status_pago", "ok")
        .add_header(AUTHORIZATION, bearer_value(&tokens, "ana@example.com"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_ID");
}
