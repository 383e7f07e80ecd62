use axum::routing::{post, put};
use axum::Router;

use crate::handlers::ticket;
use crate::state::AppState;

/// Routes mounted at `/tickets`.
///
/// ```text
/// POST   /                        -> create
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// PUT    /{id}/change-status      -> change_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(ticket::create))
        .route("/{id}", put(ticket::update).delete(ticket::delete))
        .route("/{id}/change-status", put(ticket::change_status))
}
