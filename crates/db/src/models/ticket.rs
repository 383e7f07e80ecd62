//! Ticket entity model and DTOs.

use kanban_core::board::TicketView;
use kanban_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A ticket row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub project_id: DbId,
    pub status_id: DbId,
    pub name: String,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Ticket> for TicketView {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            name: ticket.name,
            description: ticket.description,
            status_id: ticket.status_id,
        }
    }
}

/// DTO for creating a ticket. The status is always the project's first.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub project_id: DbId,
}

/// DTO for editing a ticket's text fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
