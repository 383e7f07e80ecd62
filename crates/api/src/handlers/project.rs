//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kanban_core::board::{StatusView, TicketView};
use kanban_core::error::CoreError;
use kanban_core::names::normalize_name;
use kanban_core::types::DbId;
use kanban_db::models::project::{CreateProject, ProjectSummary};
use kanban_db::repositories::{ProjectRepo, TicketRepo, TicketStatusRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Response of `POST /api/projects`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    pub created_project_id: DbId,
    pub default_statuses: Vec<StatusView>,
}

/// Everything the board needs for one project.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFull {
    pub ticket_statuses: Vec<StatusView>,
    pub tickets: Vec<TicketView>,
    /// Pass back as `expectedVersion` on the next mass edit.
    pub status_version: i64,
}

/// Board data for a project picked by name, plus the project picker list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFullAndAll {
    pub ticket_statuses: Vec<StatusView>,
    pub tickets: Vec<TicketView>,
    pub all_projects: Vec<ProjectSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectNameQuery {
    #[serde(default)]
    pub name: String,
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProjectSummary>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// POST /api/projects
///
/// Creates the project with its three default statuses.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectCreated>)> {
    let input = CreateProject {
        name: normalize_name("Project name", &input.name)?,
    };
    let (project, statuses) = ProjectRepo::create_with_default_statuses(&state.pool, &input).await?;

    tracing::info!(project_id = project.id, name = %project.name, "Project created");

    Ok((
        StatusCode::CREATED,
        Json(ProjectCreated {
            created_project_id: project.id,
            default_statuses: statuses.into_iter().map(StatusView::from).collect(),
        }),
    ))
}

/// GET /api/projects/{id}/full
pub async fn full(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<ProjectFull>> {
    let (project, statuses, tickets) = tokio::try_join!(
        ProjectRepo::find_by_id(&state.pool, id),
        TicketStatusRepo::list_by_project(&state.pool, id),
        TicketRepo::list_by_project(&state.pool, id),
    )?;
    let project = project.ok_or(AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    }))?;

    Ok(Json(ProjectFull {
        ticket_statuses: statuses.into_iter().map(StatusView::from).collect(),
        tickets: tickets.into_iter().map(TicketView::from).collect(),
        status_version: project.status_version,
    }))
}

/// GET /api/projects/full-and-all?name=
///
/// An unknown name yields empty status and ticket lists, not an error.
pub async fn full_and_all(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectNameQuery>,
) -> AppResult<Json<ProjectFullAndAll>> {
    let (statuses, tickets, all_projects) = tokio::try_join!(
        TicketStatusRepo::list_by_project_name(&state.pool, &query.name),
        TicketRepo::list_by_project_name(&state.pool, &query.name),
        ProjectRepo::list(&state.pool),
    )?;

    Ok(Json(ProjectFullAndAll {
        ticket_statuses: statuses.into_iter().map(StatusView::from).collect(),
        tickets: tickets.into_iter().map(TicketView::from).collect(),
        all_projects,
    }))
}
