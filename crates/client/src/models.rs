//! Request and response bodies of the REST surface, as seen by the client.

use std::collections::{BTreeMap, BTreeSet};

use kanban_core::board::{StatusView, TicketView};
use kanban_core::status_batch::{NewStatus, StatusBatch, StatusPatch};
use kanban_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    pub created_project_id: DbId,
    pub default_statuses: Vec<StatusView>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFull {
    pub ticket_statuses: Vec<StatusView>,
    pub tickets: Vec<TicketView>,
    pub status_version: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFullAndAll {
    pub ticket_statuses: Vec<StatusView>,
    pub tickets: Vec<TicketView>,
    pub all_projects: Vec<ProjectSummary>,
}

/// Body of `PUT /api/ticket-statuses/mass`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MassEditRequest {
    pub project_id: DbId,
    pub changes: BTreeMap<DbId, StatusPatch>,
    pub deleted_ids: BTreeSet<DbId>,
    pub new_statuses: Vec<NewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<i64>,
}

impl MassEditRequest {
    pub fn new(project_id: DbId, batch: StatusBatch, expected_version: Option<i64>) -> Self {
        Self {
            project_id,
            changes: batch.changes,
            deleted_ids: batch.deleted_ids,
            new_statuses: batch.new_statuses,
            expected_version,
        }
    }
}

/// Statuses returned by a committed mass edit.
#[derive(Debug, Clone)]
pub struct MassEditResponse {
    pub statuses: Vec<StatusView>,
    /// Taken from the `x-status-version` header when the server sends it.
    pub status_version: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub name: String,
    pub description: String,
    pub project_id: DbId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketEdit {
    pub name: String,
    pub description: String,
}

/// JSON error body produced by the server.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub code: String,
}
