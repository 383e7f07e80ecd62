//! Repository for the `projects` table.

use kanban_core::status_batch::default_statuses;
use kanban_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectSummary};
use crate::models::ticket_status::TicketStatus;
use crate::repositories::TicketStatusRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, status_version, created_at, updated_at";

/// Provides data access for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project together with its default statuses in one
    /// transaction. `input.name` is expected to be normalized already.
    pub async fn create_with_default_statuses(
        pool: &PgPool,
        input: &CreateProject,
    ) -> Result<(Project, Vec<TicketStatus>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("INSERT INTO projects (name) VALUES ($1) RETURNING {COLUMNS}");
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        let statuses =
            TicketStatusRepo::insert_many(&mut *tx, project.id, &default_statuses()).await?;

        tx.commit().await?;
        Ok((project, statuses))
    }

    /// List all projects as `{id, name}` pairs, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>("SELECT id, name FROM projects ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE name = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
