//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or an open connection, for helpers used inside a
//! transaction) as the first argument.

pub mod project_repo;
pub mod ticket_repo;
pub mod ticket_status_repo;

pub use project_repo::ProjectRepo;
pub use ticket_repo::TicketRepo;
pub use ticket_status_repo::TicketStatusRepo;
