use axum::routing::put;
use axum::Router;

use crate::handlers::ticket_status;
use crate::state::AppState;

/// Routes mounted at `/ticket-statuses`.
///
/// ```text
/// PUT    /mass    -> mass_edit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/mass", put(ticket_status::mass_edit))
}
