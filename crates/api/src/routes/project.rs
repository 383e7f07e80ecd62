use axum::routing::get;
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /full-and-all?name=  -> full_and_all
/// GET    /{id}/full           -> full
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/full-and-all", get(project::full_and_all))
        .route("/{id}/full", get(project::full))
}
