//! HTTP-level tests for the `/api/tickets` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn ticket_status(pool: &PgPool, project_id: i64, ticket_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/projects/{project_id}/full")).await).await;
    json["tickets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == ticket_id)
        .map(|t| t["statusId"].as_i64().unwrap())
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ticket_returns_201_in_first_status(pool: PgPool) {
    let (project_id, statuses) = common::create_project(&pool, "Tickets").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/tickets",
        json!({"name": "Write tests", "description": "All of them", "projectId": project_id}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Write tests");
    assert_eq!(json["description"], "All of them");
    assert_eq!(json["statusId"], statuses[0]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ticket_follows_reordered_first_status(pool: PgPool) {
    let (project_id, statuses) = common::create_project(&pool, "Reordered").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/ticket-statuses/mass",
        json!({
            "projectId": project_id,
            "changes": {
                statuses[0].to_string(): { "order": 2 },
                statuses[2].to_string(): { "order": 0 },
            },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let ticket_id = common::create_ticket(&pool, project_id, "Lands in Done").await;
    assert_eq!(ticket_status(&pool, project_id, ticket_id).await, statuses[2]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ticket_unknown_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/tickets",
        json!({"name": "Orphan", "description": "", "projectId": 999999}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_ticket_blank_name_returns_400(pool: PgPool) {
    let (project_id, _) = common::create_project(&pool, "Blank").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/tickets",
        json!({"name": "", "description": "", "projectId": project_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_status_with_non_numeric_body_returns_json_400(pool: PgPool) {
    let (project_id, _) = common::create_project(&pool, "Typed").await;
    let ticket_id = common::create_ticket(&pool, project_id, "Stays put").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/tickets/{ticket_id}/change-status"),
        json!("In Progress"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_numeric_ticket_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/tickets/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_status_returns_204(pool: PgPool) {
    let (project_id, statuses) = common::create_project(&pool, "Moves").await;
    let ticket_id = common::create_ticket(&pool, project_id, "Mover").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/tickets/{ticket_id}/change-status"),
        json!(statuses[1]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(ticket_status(&pool, project_id, ticket_id).await, statuses[1]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_status_to_foreign_status_returns_404(pool: PgPool) {
    let (project_id, statuses) = common::create_project(&pool, "Home").await;
    let (_, foreign) = common::create_project(&pool, "Away").await;
    let ticket_id = common::create_ticket(&pool, project_id, "Homebody").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/tickets/{ticket_id}/change-status"),
        json!(foreign[1]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("TicketStatus with id {} not found", foreign[1])
    );
    assert_eq!(ticket_status(&pool, project_id, ticket_id).await, statuses[0]);

    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/tickets/999999/change-status", json!(statuses[1])).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Ticket with id 999999 not found"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_ticket(pool: PgPool) {
    let (project_id, _) = common::create_project(&pool, "Edits").await;
    let ticket_id = common::create_ticket(&pool, project_id, "Before").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/tickets/{ticket_id}"),
        json!({"name": "After", "description": "Changed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "After");
    assert_eq!(json["description"], "Changed");

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/tickets/999999",
        json!({"name": "Nobody", "description": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_ticket_returns_204_then_404(pool: PgPool) {
    let (project_id, _) = common::create_project(&pool, "Deletes").await;
    let ticket_id = common::create_ticket(&pool, project_id, "Doomed").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/tickets/{ticket_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/tickets/{ticket_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
