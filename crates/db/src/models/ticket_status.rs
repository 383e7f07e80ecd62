//! Ticket status entity model and the mass-edit request DTO.

use std::collections::{BTreeMap, BTreeSet};

use kanban_core::board::StatusView;
use kanban_core::status_batch::{NewStatus, StatusBatch, StatusEntry, StatusPatch};
use kanban_core::types::{DbId, StatusOrder, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ticket_statuses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatus {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub order: StatusOrder,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&TicketStatus> for StatusEntry {
    fn from(status: &TicketStatus) -> Self {
        StatusEntry::existing(status.id, status.name.clone(), status.order)
    }
}

impl From<TicketStatus> for StatusView {
    fn from(status: TicketStatus) -> Self {
        Self {
            id: status.id,
            name: status.name,
            order: status.order,
        }
    }
}

/// Body of `PUT /api/ticket-statuses/mass`.
///
/// `expected_version`, when present, must equal the project's current
/// `status_version` or the edit is refused as a conflict.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassEditStatuses {
    pub project_id: DbId,
    #[serde(default)]
    pub changes: BTreeMap<DbId, StatusPatch>,
    #[serde(default)]
    pub deleted_ids: BTreeSet<DbId>,
    #[serde(default)]
    pub new_statuses: Vec<NewStatus>,
    #[serde(default)]
    pub expected_version: Option<i64>,
}

impl MassEditStatuses {
    pub fn batch(&self) -> StatusBatch {
        StatusBatch {
            deleted_ids: self.deleted_ids.clone(),
            changes: self.changes.clone(),
            new_statuses: self.new_statuses.clone(),
        }
    }
}

/// Statuses after a committed mass edit, with the project's new version.
#[derive(Debug, Clone)]
pub struct MassEditResult {
    pub statuses: Vec<TicketStatus>,
    pub status_version: i64,
}
