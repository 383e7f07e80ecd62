#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use kanban_core::status_batch::{NewStatus, StatusPatch};
use kanban_core::types::{DbId, StatusOrder};
use kanban_db::models::project::{CreateProject, Project};
use kanban_db::models::ticket::{CreateTicket, Ticket};
use kanban_db::models::ticket_status::{MassEditStatuses, TicketStatus};
use kanban_db::repositories::{ProjectRepo, TicketRepo};
use sqlx::PgPool;

/// Create a project with its three default statuses.
pub async fn seed_project(pool: &PgPool, name: &str) -> (Project, Vec<TicketStatus>) {
    ProjectRepo::create_with_default_statuses(
        pool,
        &CreateProject {
            name: name.to_string(),
        },
    )
    .await
    .expect("seed project")
}

pub async fn seed_ticket(pool: &PgPool, project_id: DbId, name: &str) -> Ticket {
    TicketRepo::create(
        pool,
        &CreateTicket {
            name: name.to_string(),
            description: String::new(),
            project_id,
        },
    )
    .await
    .expect("seed ticket")
    .expect("project has an order-0 status")
}

/// An empty mass edit for `project_id`; tests fill in the parts they need.
pub fn mass_edit(project_id: DbId) -> MassEditStatuses {
    MassEditStatuses {
        project_id,
        changes: BTreeMap::new(),
        deleted_ids: BTreeSet::new(),
        new_statuses: Vec::new(),
        expected_version: None,
    }
}

pub fn reorder(order: StatusOrder) -> StatusPatch {
    StatusPatch {
        name: None,
        order: Some(order),
    }
}

pub fn new_status(name: &str, order: StatusOrder) -> NewStatus {
    NewStatus {
        name: name.to_string(),
        order,
    }
}

/// `(name, order)` pairs of a project's statuses, in order.
pub fn layout(statuses: &[TicketStatus]) -> Vec<(String, StatusOrder)> {
    statuses.iter().map(|s| (s.name.clone(), s.order)).collect()
}
