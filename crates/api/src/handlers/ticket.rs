//! Handlers for the `/tickets` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kanban_core::board::TicketView;
use kanban_core::error::CoreError;
use kanban_core::names::normalize_name;
use kanban_core::status_batch::STATUS_ENTITY;
use kanban_core::types::DbId;
use kanban_db::models::ticket::{CreateTicket, UpdateTicket};
use kanban_db::repositories::TicketRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

const TICKET_ENTITY: &str = "Ticket";

/// POST /api/tickets
///
/// The ticket always starts in the project's order-0 status.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateTicket>,
) -> AppResult<(StatusCode, Json<TicketView>)> {
    let input = CreateTicket {
        name: normalize_name("Ticket name", &input.name)?,
        ..input
    };
    let ticket = TicketRepo::create(&state.pool, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: input.project_id,
        }))?;

    tracing::info!(
        ticket_id = ticket.id,
        project_id = ticket.project_id,
        status_id = ticket.status_id,
        "Ticket created"
    );
    Ok((StatusCode::CREATED, Json(ticket.into())))
}

/// PUT /api/tickets/{id}/change-status
///
/// The body is the bare id of the target status.
pub async fn change_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(status_id): ApiJson<DbId>,
) -> AppResult<StatusCode> {
    if TicketRepo::change_status(&state.pool, id, status_id).await? {
        tracing::debug!(ticket_id = id, status_id, "Ticket moved");
        return Ok(StatusCode::NO_CONTENT);
    }

    // Report whichever side of the move is missing.
    let not_found = match TicketRepo::find_by_id(&state.pool, id).await? {
        None => CoreError::NotFound {
            entity: TICKET_ENTITY,
            id,
        },
        Some(_) => CoreError::NotFound {
            entity: STATUS_ENTITY,
            id: status_id,
        },
    };
    Err(not_found.into())
}

/// PUT /api/tickets/{id}
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateTicket>,
) -> AppResult<Json<TicketView>> {
    let input = UpdateTicket {
        name: normalize_name("Ticket name", &input.name)?,
        ..input
    };
    let ticket = TicketRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: TICKET_ENTITY,
            id,
        }))?;
    Ok(Json(ticket.into()))
}

/// DELETE /api/tickets/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    if TicketRepo::delete(&state.pool, id).await? {
        tracing::info!(ticket_id = id, "Ticket deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: TICKET_ENTITY,
            id,
        }))
    }
}
