pub mod health;
pub mod project;
pub mod ticket;
pub mod ticket_status;

use axum::http::StatusCode;
use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                          list, create
/// /projects/{id}/full                statuses + tickets + status version
/// /projects/full-and-all?name=       statuses + tickets by name, all projects
///
/// /ticket-statuses/mass              batch delete/patch/insert (PUT)
///
/// /tickets                           create (POST)
/// /tickets/{id}                      update (PUT), delete (DELETE)
/// /tickets/{id}/change-status        move to another status (PUT)
/// ```
///
/// Unmatched `/api` paths answer 404 even when a static fallback is
/// mounted at the root.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/ticket-statuses", ticket_status::router())
        .nest("/tickets", ticket::router())
        .fallback(|| async { StatusCode::NOT_FOUND })
}
