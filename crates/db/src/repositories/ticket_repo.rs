//! Repository for the `tickets` table.

use kanban_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, status_id, name, description, created_at, updated_at";

/// Provides CRUD operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a ticket into its project's order-0 status.
    ///
    /// Returns `None` when the project has no status at order 0, which
    /// only happens when the project does not exist.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (name, description, status_id, project_id) \
             SELECT $1, $2, s.id, s.project_id \
             FROM ticket_statuses s \
             WHERE s.project_id = $3 AND s.\"order\" = 0 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.project_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List the tickets of the project with the given name.
    pub async fn list_by_project_name(
        pool: &PgPool,
        project_name: &str,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            "SELECT t.id, t.project_id, t.status_id, t.name, t.description, \
                    t.created_at, t.updated_at \
             FROM tickets t \
             JOIN projects p ON p.id = t.project_id \
             WHERE p.name = $1 \
             ORDER BY t.id",
        )
        .bind(project_name)
        .fetch_all(pool)
        .await
    }

    /// Move a ticket to another status of the same project.
    ///
    /// Returns `false` if the ticket does not exist or the status belongs to
    /// a different project (or does not exist).
    pub async fn change_status(
        pool: &PgPool,
        id: DbId,
        status_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tickets SET status_id = $2 \
             WHERE id = $1 \
               AND EXISTS ( \
                   SELECT 1 FROM ticket_statuses s \
                   WHERE s.id = $2 AND s.project_id = tickets.project_id \
               )",
        )
        .bind(id)
        .bind(status_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a ticket's name and description.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!(
            "UPDATE tickets SET name = $2, description = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
