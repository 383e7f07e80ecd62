//! Handler for the status mass edit.

use axum::extract::State;
use axum::Json;
use kanban_core::board::StatusView;
use kanban_db::models::ticket_status::MassEditStatuses;
use kanban_db::repositories::TicketStatusRepo;

use crate::error::AppResult;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Response header carrying the project's `status_version` after an edit.
pub const STATUS_VERSION_HEADER: &str = "x-status-version";

/// PUT /api/ticket-statuses/mass
///
/// Returns the project's statuses sorted by order. The new version stamp
/// travels in the [`STATUS_VERSION_HEADER`] header.
pub async fn mass_edit(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<MassEditStatuses>,
) -> AppResult<([(&'static str, String); 1], Json<Vec<StatusView>>)> {
    let policy = state.config.mass_edit_policy();
    let result = TicketStatusRepo::mass_edit(&state.pool, &input, policy).await?;

    Ok((
        [(STATUS_VERSION_HEADER, result.status_version.to_string())],
        Json(result.statuses.into_iter().map(StatusView::from).collect()),
    ))
}
