//! Repository for the `ticket_statuses` table, including the
//! transactional mass edit.

use kanban_core::error::CoreError;
use kanban_core::ordering::check_ordering;
use kanban_core::policy::{MassEditPolicy, OrphanTicketPolicy};
use kanban_core::status_batch::{apply_batch, NewStatus, StatusEntry};
use kanban_core::types::{DbId, StatusOrder};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::ticket_status::{MassEditResult, MassEditStatuses, TicketStatus};
use crate::DbError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, \"order\", created_at, updated_at";

/// Provides data access for ticket statuses.
pub struct TicketStatusRepo;

impl TicketStatusRepo {
    /// List a project's statuses ordered by position.
    pub async fn list_by_project<'e, E>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<TicketStatus>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_statuses \
             WHERE project_id = $1 \
             ORDER BY \"order\", id"
        );
        sqlx::query_as::<_, TicketStatus>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// List the statuses of the project with the given name.
    pub async fn list_by_project_name(
        pool: &PgPool,
        project_name: &str,
    ) -> Result<Vec<TicketStatus>, sqlx::Error> {
        sqlx::query_as::<_, TicketStatus>(
            "SELECT s.id, s.project_id, s.name, s.\"order\", s.created_at, s.updated_at \
             FROM ticket_statuses s \
             JOIN projects p ON p.id = s.project_id \
             WHERE p.name = $1 \
             ORDER BY s.\"order\", s.id",
        )
        .bind(project_name)
        .fetch_all(pool)
        .await
    }

    /// Insert several statuses for one project in a single statement.
    pub async fn insert_many(
        conn: &mut PgConnection,
        project_id: DbId,
        statuses: &[NewStatus],
    ) -> Result<Vec<TicketStatus>, sqlx::Error> {
        if statuses.is_empty() {
            return Ok(vec![]);
        }

        let names: Vec<String> = statuses.iter().map(|s| s.name.clone()).collect();
        let orders: Vec<StatusOrder> = statuses.iter().map(|s| s.order).collect();

        let query = format!(
            "INSERT INTO ticket_statuses (project_id, name, \"order\") \
             SELECT $1, n.name, n.ord \
             FROM UNNEST($2::text[], $3::int[]) AS n(name, ord) \
             RETURNING {COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, TicketStatus>(&query)
            .bind(project_id)
            .bind(&names)
            .bind(&orders)
            .fetch_all(&mut *conn)
            .await?;
        rows.sort_by_key(|s| s.order);
        Ok(rows)
    }

    /// Apply a batch of deletions, renames/reorders and inserts to one
    /// project's statuses, all or nothing.
    ///
    /// The project row is locked for the duration of the transaction, so
    /// mass edits of the same project are serialized. The batch is first
    /// resolved in memory (which rejects empty and mis-ordered batches
    /// before any write), then persisted, then re-read and checked once
    /// more before commit. Any error drops the transaction, rolling back
    /// every step.
    pub async fn mass_edit(
        pool: &PgPool,
        input: &MassEditStatuses,
        policy: MassEditPolicy,
    ) -> Result<MassEditResult, DbError> {
        let project_id = input.project_id;
        let batch = input.batch();
        if batch.is_empty() {
            return Err(CoreError::Validation("Empty body".to_string()).into());
        }

        let mut tx = pool.begin().await?;

        let version: Option<(i64,)> =
            sqlx::query_as("SELECT status_version FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((version,)) = version else {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            }
            .into());
        };
        if let Some(expected) = input.expected_version {
            if expected != version {
                return Err(CoreError::Conflict(format!(
                    "Statuses of project {project_id} changed \
                     (version {version}, expected {expected})"
                ))
                .into());
            }
        }

        let current = Self::list_by_project(&mut *tx, project_id).await?;
        let entries: Vec<StatusEntry> = current.iter().map(StatusEntry::from).collect();
        let outcome = apply_batch(&entries, &batch, policy.foreign_ids)?;

        if !outcome.deleted_ids.is_empty() {
            match policy.orphans {
                OrphanTicketPolicy::Block => {
                    let (count,): (i64,) =
                        sqlx::query_as("SELECT COUNT(*) FROM tickets WHERE status_id = ANY($1)")
                            .bind(&outcome.deleted_ids)
                            .fetch_one(&mut *tx)
                            .await?;
                    if count > 0 {
                        return Err(CoreError::Conflict(format!(
                            "{count} ticket(s) still use a status being deleted"
                        ))
                        .into());
                    }
                }
                OrphanTicketPolicy::Cascade => {
                    let removed = sqlx::query("DELETE FROM tickets WHERE status_id = ANY($1)")
                        .bind(&outcome.deleted_ids)
                        .execute(&mut *tx)
                        .await?;
                    tracing::debug!(
                        project_id,
                        tickets = removed.rows_affected(),
                        "Deleted tickets of removed statuses"
                    );
                }
                // Needs the final order-0 status, which may be inserted below.
                OrphanTicketPolicy::Reassign => {}
            }
        }

        if !outcome.changes.is_empty() {
            let ids: Vec<DbId> = outcome.changes.keys().copied().collect();
            let names: Vec<Option<String>> =
                outcome.changes.values().map(|p| p.name.clone()).collect();
            let orders: Vec<Option<StatusOrder>> =
                outcome.changes.values().map(|p| p.order).collect();

            sqlx::query(
                "UPDATE ticket_statuses AS s SET \
                    name = COALESCE(c.name, s.name), \
                    \"order\" = COALESCE(c.ord, s.\"order\") \
                 FROM UNNEST($2::bigint[], $3::text[], $4::int[]) AS c(id, name, ord) \
                 WHERE s.id = c.id AND s.project_id = $1",
            )
            .bind(project_id)
            .bind(&ids)
            .bind(&names)
            .bind(&orders)
            .execute(&mut *tx)
            .await?;
        }

        Self::insert_many(&mut *tx, project_id, &outcome.new_statuses).await?;

        if !outcome.deleted_ids.is_empty() && policy.orphans == OrphanTicketPolicy::Reassign {
            let moved = sqlx::query(
                "UPDATE tickets SET status_id = ( \
                    SELECT id FROM ticket_statuses \
                    WHERE project_id = $1 AND \"order\" = 0 AND id <> ALL($2) \
                 ) \
                 WHERE status_id = ANY($2)",
            )
            .bind(project_id)
            .bind(&outcome.deleted_ids)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(
                project_id,
                tickets = moved.rows_affected(),
                "Reassigned tickets of removed statuses"
            );
        }

        if !outcome.deleted_ids.is_empty() {
            sqlx::query("DELETE FROM ticket_statuses WHERE project_id = $1 AND id = ANY($2)")
                .bind(project_id)
                .bind(&outcome.deleted_ids)
                .execute(&mut *tx)
                .await?;
        }

        let (status_version,): (i64,) = sqlx::query_as(
            "UPDATE projects SET status_version = status_version + 1 \
             WHERE id = $1 \
             RETURNING status_version",
        )
        .bind(project_id)
        .fetch_one(&mut *tx)
        .await?;

        let statuses = Self::list_by_project(&mut *tx, project_id).await?;
        check_ordering(statuses.iter().map(|s| s.order)).map_err(|e| {
            CoreError::Validation(format!("Resulting statuses were out of order: {e}"))
        })?;

        tx.commit().await?;

        tracing::info!(
            project_id,
            deleted = outcome.deleted_ids.len(),
            changed = outcome.changes.len(),
            inserted = outcome.new_statuses.len(),
            status_version,
            "Ticket statuses mass-edited"
        );

        Ok(MassEditResult {
            statuses,
            status_version,
        })
    }
}
