#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kanban_core::policy::{ForeignIdPolicy, OrphanTicketPolicy};
use sqlx::PgPool;
use tower::ServiceExt;

use kanban_api::config::{LogFormat, ServerConfig};
use kanban_api::router::build_app_router;
use kanban_api::state::AppState;

/// Build a test `ServerConfig` with the development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8080".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        static_dir: None,
        foreign_id_policy: ForeignIdPolicy::Ignore,
        orphan_ticket_policy: OrphanTicketPolicy::Reassign,
        log_format: LogFormat::Text,
    }
}

/// Build the application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Create a project through the API and return `(project_id, status ids by order)`.
pub async fn create_project(pool: &PgPool, name: &str) -> (i64, Vec<i64>) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/projects", serde_json::json!({ "name": name })).await;
    let json = body_json(response).await;
    let project_id = json["createdProjectId"].as_i64().unwrap();
    let statuses = json["defaultStatuses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    (project_id, statuses)
}

/// Create a ticket through the API and return its id.
pub async fn create_ticket(pool: &PgPool, project_id: i64, name: &str) -> i64 {
    let app = build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/tickets",
        serde_json::json!({ "name": name, "description": "", "projectId": project_id }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
