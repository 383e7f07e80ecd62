//! Domain logic for the Kanban board: status ordering, batch edits of a
//! project's status columns, and the client-side board projection.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into it; the client crate uses it to keep its local board state.

pub mod board;
pub mod error;
pub mod names;
pub mod ordering;
pub mod policy;
pub mod sorting;
pub mod status_batch;
pub mod status_editor;
pub mod types;
