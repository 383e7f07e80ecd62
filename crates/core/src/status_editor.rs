//! Editing session for a project's status columns.
//!
//! A session starts from a snapshot of the saved statuses and keeps a
//! working list that is always densely ordered. Users rename, move, remove
//! and add rows; [`StatusEditSession::to_batch`] diffs the working list
//! against the snapshot to produce the minimal [`StatusBatch`] to send.
//!
//! Rows added in the session have no database id yet. They are keyed by
//! negative virtual ids drawn from a counter owned by the session, so two
//! sessions never hand out ids from a shared sequence.

use std::collections::BTreeMap;

use crate::board::StatusView;
use crate::error::CoreError;
use crate::names::normalize_name;
use crate::policy::ForeignIdPolicy;
use crate::sorting::by_key;
use crate::status_batch::{
    apply_batch, BatchOutcome, NewStatus, StatusBatch, StatusEntry, StatusPatch, STATUS_ENTITY,
};
use crate::types::{DbId, StatusOrder};

/// Identifies a row in the editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    /// A status that exists on the server.
    Saved(DbId),
    /// A status added in this session; the id is negative and local.
    Draft(DbId),
}

impl RowKey {
    fn raw_id(self) -> DbId {
        match self {
            Self::Saved(id) | Self::Draft(id) => id,
        }
    }
}

/// One row of the working list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRow {
    pub key: RowKey,
    pub name: String,
    pub order: StatusOrder,
}

#[derive(Debug, Clone)]
pub struct StatusEditSession {
    saved: BTreeMap<DbId, StatusView>,
    rows: Vec<EditRow>,
    next_virtual_id: DbId,
}

impl StatusEditSession {
    /// Start a session from the statuses currently saved for a project.
    pub fn new(statuses: &[StatusView]) -> Self {
        let mut sorted: Vec<&StatusView> = statuses.iter().collect();
        sorted.sort_by(by_key(|s: &&StatusView| (s.order, s.id)));

        let mut session = Self {
            saved: statuses.iter().map(|s| (s.id, s.clone())).collect(),
            rows: sorted
                .into_iter()
                .map(|s| EditRow {
                    key: RowKey::Saved(s.id),
                    name: s.name.clone(),
                    order: s.order,
                })
                .collect(),
            next_virtual_id: -1,
        };
        session.renumber();
        session
    }

    /// Rows in display order. `rows()[i].order == i` always holds.
    pub fn rows(&self) -> &[EditRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `true` once the working list differs from the saved statuses.
    pub fn is_dirty(&self) -> bool {
        !self.to_batch().is_empty()
    }

    pub fn rename(&mut self, key: RowKey, name: &str) -> Result<(), CoreError> {
        let index = self.position(key)?;
        self.rows[index].name = name.to_string();
        Ok(())
    }

    /// Swap the row with the one above it. No-op for the first row.
    pub fn move_up(&mut self, key: RowKey) -> Result<(), CoreError> {
        let index = self.position(key)?;
        if index > 0 {
            self.rows.swap(index - 1, index);
            self.renumber();
        }
        Ok(())
    }

    /// Swap the row with the one below it. No-op for the last row.
    pub fn move_down(&mut self, key: RowKey) -> Result<(), CoreError> {
        let index = self.position(key)?;
        if index + 1 < self.rows.len() {
            self.rows.swap(index, index + 1);
            self.renumber();
        }
        Ok(())
    }

    /// Remove a row; the rows below it move up one position.
    ///
    /// A project always keeps at least one status, so the last row cannot
    /// be removed.
    pub fn remove(&mut self, key: RowKey) -> Result<(), CoreError> {
        let index = self.position(key)?;
        if self.rows.len() == 1 {
            return Err(CoreError::Validation(
                "A project must keep at least one status".to_string(),
            ));
        }
        self.rows.remove(index);
        self.renumber();
        Ok(())
    }

    /// Append a new status at the end and return its draft key.
    pub fn add(&mut self, name: &str) -> Result<RowKey, CoreError> {
        let name = normalize_name("Status name", name)?;
        let key = RowKey::Draft(self.next_virtual_id);
        self.next_virtual_id -= 1;
        self.rows.push(EditRow {
            key,
            name,
            order: 0,
        });
        self.renumber();
        Ok(key)
    }

    /// The batch that turns the saved statuses into the working list.
    pub fn to_batch(&self) -> StatusBatch {
        let mut batch = StatusBatch::default();

        for id in self.saved.keys() {
            if !self.rows.iter().any(|r| r.key == RowKey::Saved(*id)) {
                batch.deleted_ids.insert(*id);
            }
        }

        for row in &self.rows {
            match row.key {
                RowKey::Saved(id) => {
                    let Some(saved) = self.saved.get(&id) else {
                        continue;
                    };
                    let patch = StatusPatch {
                        name: (row.name != saved.name).then(|| row.name.clone()),
                        order: (row.order != saved.order).then_some(row.order),
                    };
                    if !patch.is_empty() {
                        batch.changes.insert(id, patch);
                    }
                }
                RowKey::Draft(_) => batch.new_statuses.push(NewStatus {
                    name: row.name.clone(),
                    order: row.order,
                }),
            }
        }

        batch
    }

    /// Run the batch through the editor without sending it anywhere.
    pub fn preview(&self) -> Result<BatchOutcome, CoreError> {
        let current: Vec<StatusEntry> = self
            .saved
            .values()
            .map(|s| StatusEntry::existing(s.id, s.name.clone(), s.order))
            .collect();
        apply_batch(&current, &self.to_batch(), ForeignIdPolicy::Reject)
    }

    fn position(&self, key: RowKey) -> Result<usize, CoreError> {
        self.rows
            .iter()
            .position(|r| r.key == key)
            .ok_or(CoreError::NotFound {
                entity: STATUS_ENTITY,
                id: key.raw_id(),
            })
    }

    fn renumber(&mut self) {
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.order = StatusOrder::try_from(index).unwrap_or(StatusOrder::MAX);
        }
    }
}
