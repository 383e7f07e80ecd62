//! REST client for the kanban API.

use kanban_core::board::TicketView;
use kanban_core::error::CoreError;
use kanban_core::types::DbId;

use crate::models::{
    ErrorBody, MassEditRequest, MassEditResponse, NewTicket, ProjectCreated, ProjectFull,
    ProjectFullAndAll, ProjectSummary, TicketEdit,
};

/// Header carrying the project's status version after a mass edit.
const STATUS_VERSION_HEADER: &str = "x-status-version";

/// HTTP client for one kanban API server.
#[derive(Debug, Clone)]
pub struct KanbanApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        /// Machine-readable code such as `VALIDATION_ERROR`.
        code: String,
        message: String,
    },

    /// The operation was refused locally before reaching the server.
    #[error(transparent)]
    Local(#[from] CoreError),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl KanbanApi {
    /// * `base_url` - Server root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// `GET /api/projects`
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ClientError> {
        let response = self.client.get(self.url("/api/projects")).send().await?;
        Self::parse_response(response).await
    }

    /// `POST /api/projects`
    pub async fn create_project(&self, name: &str) -> Result<ProjectCreated, ClientError> {
        let response = self
            .client
            .post(self.url("/api/projects"))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/projects/{id}/full`
    pub async fn project_full(&self, project_id: DbId) -> Result<ProjectFull, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/projects/{project_id}/full")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/projects/full-and-all?name=`
    pub async fn full_and_all(&self, name: &str) -> Result<ProjectFullAndAll, ClientError> {
        let response = self
            .client
            .get(self.url("/api/projects/full-and-all"))
            .query(&[("name", name)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /api/ticket-statuses/mass`
    pub async fn mass_edit(
        &self,
        request: &MassEditRequest,
    ) -> Result<MassEditResponse, ClientError> {
        let response = self
            .client
            .put(self.url("/api/ticket-statuses/mass"))
            .json(request)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;

        let status_version = response
            .headers()
            .get(STATUS_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let statuses = response.json().await?;
        Ok(MassEditResponse {
            statuses,
            status_version,
        })
    }

    /// `POST /api/tickets`
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketView, ClientError> {
        let response = self
            .client
            .post(self.url("/api/tickets"))
            .json(ticket)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /api/tickets/{id}/change-status`
    pub async fn change_status(&self, ticket_id: DbId, status_id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/api/tickets/{ticket_id}/change-status")))
            .json(&status_id)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// `PUT /api/tickets/{id}`
    pub async fn update_ticket(
        &self,
        ticket_id: DbId,
        edit: &TicketEdit,
    ) -> Result<TicketView, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/api/tickets/{ticket_id}")))
            .json(edit)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE /api/tickets/{id}`
    pub async fn delete_ticket(&self, ticket_id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/tickets/{ticket_id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], reading the
    /// server's `{error, code}` body when there is one.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (parsed.code, parsed.error),
            Err(_) => (String::new(), body),
        };
        tracing::debug!(status = status.as_u16(), %code, %message, "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
