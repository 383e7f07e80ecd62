//! Client-side board model.
//!
//! [`project_board`] derives the column layout from a flat ticket list.
//! [`BoardState`] holds the statuses and tickets a client is showing and
//! applies the state transitions the UI drives: server-confirmed inserts,
//! updates and deletes, and optimistic status changes that can be rolled
//! back.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::sorting::by_key;
use crate::status_batch::STATUS_ENTITY;
use crate::types::{DbId, StatusOrder};

/// A ticket status as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub id: DbId,
    pub name: String,
    pub order: StatusOrder,
}

/// A ticket as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub status_id: DbId,
}

/// One column: a status and its tickets sorted by lower-cased name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    pub status: &'a StatusView,
    pub tickets: Vec<&'a TicketView>,
}

/// The projected board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<'a> {
    /// Columns sorted by status order.
    pub columns: Vec<BoardColumn<'a>>,
    /// Tickets whose status is not among the given statuses.
    pub orphans: Vec<&'a TicketView>,
}

impl<'a> Board<'a> {
    pub fn column(&self, status_id: DbId) -> Option<&BoardColumn<'a>> {
        self.columns.iter().find(|c| c.status.id == status_id)
    }
}

fn ticket_sort_key(ticket: &&TicketView) -> (String, DbId) {
    (ticket.name.to_lowercase(), ticket.id)
}

/// Group `tickets` into columns by status id.
///
/// The result depends only on the contents of the inputs, not on their
/// order: columns follow status `order`, tickets within a column follow
/// their lower-cased name with the id as tie-breaker.
pub fn project_board<'a>(statuses: &'a [StatusView], tickets: &'a [TicketView]) -> Board<'a> {
    let mut by_status: HashMap<DbId, Vec<&'a TicketView>> = HashMap::new();
    for ticket in tickets {
        by_status.entry(ticket.status_id).or_default().push(ticket);
    }

    let mut ordered: Vec<&'a StatusView> = statuses.iter().collect();
    ordered.sort_by(by_key(|s: &&StatusView| (s.order, s.id)));

    let columns = ordered
        .into_iter()
        .map(|status| {
            let mut tickets = by_status.remove(&status.id).unwrap_or_default();
            tickets.sort_by(by_key(ticket_sort_key));
            BoardColumn { status, tickets }
        })
        .collect();

    let mut orphans: Vec<&'a TicketView> = by_status.into_values().flatten().collect();
    orphans.sort_by(by_key(ticket_sort_key));

    Board { columns, orphans }
}

// ---------------------------------------------------------------------------
// Board state
// ---------------------------------------------------------------------------

/// An optimistic status change that has been applied locally and awaits
/// the server's answer. Pass it to [`BoardState::rollback`] on failure or
/// call [`PendingChange::commit`] on success.
#[must_use = "a pending change must be committed or rolled back"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub ticket_id: DbId,
    pub previous_status_id: DbId,
    pub applied_status_id: DbId,
}

impl PendingChange {
    /// Accept the local change as confirmed.
    pub fn commit(self) {}
}

/// Statuses and tickets of the project currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    statuses: Vec<StatusView>,
    tickets: Vec<TicketView>,
}

impl BoardState {
    pub fn new(statuses: Vec<StatusView>, tickets: Vec<TicketView>) -> Self {
        Self { statuses, tickets }
    }

    pub fn statuses(&self) -> &[StatusView] {
        &self.statuses
    }

    pub fn tickets(&self) -> &[TicketView] {
        &self.tickets
    }

    pub fn ticket(&self, id: DbId) -> Option<&TicketView> {
        self.tickets.iter().find(|t| t.id == id)
    }

    pub fn board(&self) -> Board<'_> {
        project_board(&self.statuses, &self.tickets)
    }

    /// Add a ticket the server has created.
    pub fn insert_ticket(&mut self, ticket: TicketView) {
        self.tickets.retain(|t| t.id != ticket.id);
        self.tickets.push(ticket);
    }

    /// Replace a ticket with the server's updated copy. Returns `false` if
    /// the ticket is not on the board.
    pub fn replace_ticket(&mut self, ticket: TicketView) -> bool {
        match self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(slot) => {
                *slot = ticket;
                true
            }
            None => false,
        }
    }

    /// Remove a ticket the server has deleted.
    pub fn remove_ticket(&mut self, id: DbId) -> Option<TicketView> {
        let index = self.tickets.iter().position(|t| t.id == id)?;
        Some(self.tickets.remove(index))
    }

    /// Swap in the statuses returned by a confirmed mass edit.
    pub fn replace_statuses(&mut self, statuses: Vec<StatusView>) {
        self.statuses = statuses;
    }

    /// Ids of tickets whose status is not on the board.
    pub fn orphaned_ticket_ids(&self) -> BTreeSet<DbId> {
        self.board().orphans.iter().map(|t| t.id).collect()
    }

    /// Move a ticket to another status locally, before the server confirms.
    pub fn begin_status_change(
        &mut self,
        ticket_id: DbId,
        new_status_id: DbId,
    ) -> Result<PendingChange, CoreError> {
        if !self.statuses.iter().any(|s| s.id == new_status_id) {
            return Err(CoreError::NotFound {
                entity: STATUS_ENTITY,
                id: new_status_id,
            });
        }
        let ticket = self
            .tickets
            .iter_mut()
            .find(|t| t.id == ticket_id)
            .ok_or(CoreError::NotFound {
                entity: "Ticket",
                id: ticket_id,
            })?;

        let previous_status_id = ticket.status_id;
        ticket.status_id = new_status_id;
        Ok(PendingChange {
            ticket_id,
            previous_status_id,
            applied_status_id: new_status_id,
        })
    }

    /// Undo an optimistic status change after the server refused it.
    ///
    /// Returns `false` when nothing was restored: the ticket is gone or has
    /// been moved again since the change was applied.
    pub fn rollback(&mut self, pending: PendingChange) -> bool {
        match self.tickets.iter_mut().find(|t| t.id == pending.ticket_id) {
            Some(ticket) if ticket.status_id == pending.applied_status_id => {
                ticket.status_id = pending.previous_status_id;
                true
            }
            _ => false,
        }
    }
}
