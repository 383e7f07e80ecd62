//! A live board: local [`BoardState`] plus the server it mirrors.
//!
//! Ticket creation, edits and deletions are applied locally only after the
//! server confirms them. Moving a ticket between columns is optimistic: the
//! local state changes first and is rolled back if the server refuses.

use kanban_core::board::{Board, BoardState, TicketView};
use kanban_core::names::normalize_name;
use kanban_core::status_editor::StatusEditSession;
use kanban_core::types::DbId;

use crate::api::{ClientError, KanbanApi};
use crate::models::{MassEditRequest, NewTicket, TicketEdit};

pub struct BoardSession {
    api: KanbanApi,
    project_id: DbId,
    state: BoardState,
    status_version: i64,
}

impl BoardSession {
    /// Load a project's board from the server.
    pub async fn open(api: KanbanApi, project_id: DbId) -> Result<Self, ClientError> {
        let full = api.project_full(project_id).await?;
        Ok(Self {
            api,
            project_id,
            state: BoardState::new(full.ticket_statuses, full.tickets),
            status_version: full.status_version,
        })
    }

    pub fn project_id(&self) -> DbId {
        self.project_id
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> Board<'_> {
        self.state.board()
    }

    /// Version of the statuses this session last saw.
    pub fn status_version(&self) -> i64 {
        self.status_version
    }

    /// Replace the local state with the server's current view.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let full = self.api.project_full(self.project_id).await?;
        self.state = BoardState::new(full.ticket_statuses, full.tickets);
        self.status_version = full.status_version;
        Ok(())
    }

    pub async fn create_ticket(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<TicketView, ClientError> {
        let ticket = self
            .api
            .create_ticket(&NewTicket {
                name: normalize_name("Ticket name", name)?,
                description: description.to_string(),
                project_id: self.project_id,
            })
            .await?;
        self.state.insert_ticket(ticket.clone());
        Ok(ticket)
    }

    /// Drop a ticket onto another column.
    ///
    /// The move shows immediately. If the server refuses it, the ticket goes
    /// back to its previous column and the error is returned.
    pub async fn move_ticket(
        &mut self,
        ticket_id: DbId,
        status_id: DbId,
    ) -> Result<(), ClientError> {
        let pending = self.state.begin_status_change(ticket_id, status_id)?;
        if pending.previous_status_id == status_id {
            pending.commit();
            return Ok(());
        }

        match self.api.change_status(ticket_id, status_id).await {
            Ok(()) => {
                pending.commit();
                Ok(())
            }
            Err(e) => {
                let restored = self.state.rollback(pending);
                tracing::warn!(ticket_id, status_id, restored, error = %e, "Ticket move refused");
                Err(e)
            }
        }
    }

    pub async fn update_ticket(
        &mut self,
        ticket_id: DbId,
        name: &str,
        description: &str,
    ) -> Result<TicketView, ClientError> {
        let edit = TicketEdit {
            name: normalize_name("Ticket name", name)?,
            description: description.to_string(),
        };
        let ticket = self.api.update_ticket(ticket_id, &edit).await?;
        if !self.state.replace_ticket(ticket.clone()) {
            self.state.insert_ticket(ticket.clone());
        }
        Ok(ticket)
    }

    pub async fn delete_ticket(&mut self, ticket_id: DbId) -> Result<(), ClientError> {
        self.api.delete_ticket(ticket_id).await?;
        self.state.remove_ticket(ticket_id);
        Ok(())
    }

    /// Start editing the status columns shown by this session.
    pub fn edit_statuses(&self) -> StatusEditSession {
        StatusEditSession::new(self.state.statuses())
    }

    /// Send the edits of `editor` as one mass edit.
    ///
    /// The batch is checked locally first. A session with nothing to save
    /// is a no-op. When statuses were deleted the whole board is reloaded,
    /// since the server may have moved or removed their tickets.
    pub async fn save_statuses(&mut self, editor: &StatusEditSession) -> Result<(), ClientError> {
        let batch = editor.to_batch();
        if batch.is_empty() {
            return Ok(());
        }
        editor.preview()?;

        let deleted_any = !batch.deleted_ids.is_empty();
        let request = MassEditRequest::new(self.project_id, batch, Some(self.status_version));
        let response = self.api.mass_edit(&request).await?;

        match response.status_version {
            Some(version) if !deleted_any => {
                self.state.replace_statuses(response.statuses);
                self.status_version = version;
            }
            _ => self.refresh().await?,
        }

        tracing::debug!(
            project_id = self.project_id,
            status_version = self.status_version,
            "Statuses saved"
        );
        Ok(())
    }
}
