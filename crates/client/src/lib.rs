//! Typed HTTP client for the kanban API and a board session that keeps a
//! local [`BoardState`](kanban_core::board::BoardState) in step with the
//! server.

pub mod api;
pub mod models;
pub mod session;

pub use api::{ClientError, KanbanApi};
pub use session::BoardSession;
