//! Batch editing of a project's ticket statuses ("mass edit").
//!
//! A [`StatusBatch`] bundles deletions, partial patches and new statuses.
//! [`apply_batch`] resolves it against the current statuses of one project
//! and validates the result as a whole. The same function backs the
//! client-side preview and the server-side transaction, so a batch the
//! client previews successfully is one the server would accept given the
//! same starting state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::names::normalize_name;
use crate::ordering::check_ordering;
use crate::policy::ForeignIdPolicy;
use crate::sorting::by_key;
use crate::types::{DbId, StatusOrder};

/// Entity label used in not-found errors raised by the editor.
pub const STATUS_ENTITY: &str = "TicketStatus";

/// Names and orders of the statuses every new project starts with.
pub const DEFAULT_STATUSES: [(&str, StatusOrder); 3] =
    [("To Do", 0), ("In Progress", 1), ("Done", 2)];

/// Partial update of one existing status. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<StatusOrder>,
}

impl StatusPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.order.is_none()
    }
}

/// A status to be created. The caller proposes its final `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStatus {
    pub name: String,
    pub order: StatusOrder,
}

/// One mass edit of a project's statuses.
///
/// `changes` is keyed by status id; on the wire it is a JSON object whose
/// keys are the ids as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBatch {
    #[serde(default)]
    pub deleted_ids: BTreeSet<DbId>,
    #[serde(default)]
    pub changes: BTreeMap<DbId, StatusPatch>,
    #[serde(default)]
    pub new_statuses: Vec<NewStatus>,
}

impl StatusBatch {
    /// A batch with no deletions, no changes and no new statuses.
    pub fn is_empty(&self) -> bool {
        self.deleted_ids.is_empty() && self.changes.is_empty() && self.new_statuses.is_empty()
    }
}

/// A status as seen by the editor. `id` is `None` for entries created by
/// the batch and not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub id: Option<DbId>,
    pub name: String,
    pub order: StatusOrder,
}

impl StatusEntry {
    pub fn existing(id: DbId, name: impl Into<String>, order: StatusOrder) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            order,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// The validated result of applying a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Final statuses sorted by `order`.
    pub statuses: Vec<StatusEntry>,
    /// Deletions that target statuses of this project.
    pub deleted_ids: Vec<DbId>,
    /// Non-empty patches that target surviving statuses of this project,
    /// with names normalized.
    pub changes: BTreeMap<DbId, StatusPatch>,
    /// New statuses with names normalized, in request order.
    pub new_statuses: Vec<NewStatus>,
}

/// Apply `batch` to `current` (all statuses of one project) and validate
/// the resulting order sequence.
///
/// Processing order: empty-batch guard, foreign id resolution, deletions,
/// patches, inserts, holistic order check. A batch that would leave the
/// project without any status is rejected as well, since tickets need an
/// order-0 status to land in. No step is committed anywhere;
/// callers persist the returned [`BatchOutcome`] only on success.
pub fn apply_batch(
    current: &[StatusEntry],
    batch: &StatusBatch,
    policy: ForeignIdPolicy,
) -> Result<BatchOutcome, CoreError> {
    if batch.is_empty() {
        return Err(CoreError::Validation("Empty body".to_string()));
    }

    let known: BTreeSet<DbId> = current.iter().filter_map(|s| s.id).collect();
    let referenced = batch
        .deleted_ids
        .iter()
        .chain(batch.changes.keys())
        .copied();
    for id in referenced {
        if !known.contains(&id) && policy == ForeignIdPolicy::Reject {
            return Err(CoreError::NotFound {
                entity: STATUS_ENTITY,
                id,
            });
        }
    }

    let deleted_ids: Vec<DbId> = batch
        .deleted_ids
        .iter()
        .copied()
        .filter(|id| known.contains(id))
        .collect();

    let mut changes = BTreeMap::new();
    for (&id, patch) in &batch.changes {
        if !known.contains(&id) || batch.deleted_ids.contains(&id) || patch.is_empty() {
            continue;
        }
        let name = patch
            .name
            .as_deref()
            .map(|n| normalize_name("Status name", n))
            .transpose()?;
        changes.insert(
            id,
            StatusPatch {
                name,
                order: patch.order,
            },
        );
    }

    let new_statuses = batch
        .new_statuses
        .iter()
        .map(|s| {
            Ok(NewStatus {
                name: normalize_name("Status name", &s.name)?,
                order: s.order,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    let mut statuses: Vec<StatusEntry> = current
        .iter()
        .filter(|s| s.id.is_some_and(|id| !batch.deleted_ids.contains(&id)))
        .cloned()
        .collect();

    for status in &mut statuses {
        let Some(patch) = status.id.and_then(|id| changes.get(&id)) else {
            continue;
        };
        if let Some(name) = &patch.name {
            status.name = name.clone();
        }
        if let Some(order) = patch.order {
            status.order = order;
        }
    }

    statuses.extend(new_statuses.iter().map(|s| StatusEntry {
        id: None,
        name: s.name.clone(),
        order: s.order,
    }));

    if statuses.is_empty() {
        return Err(CoreError::Validation(
            "A project must keep at least one status".to_string(),
        ));
    }

    check_ordering(statuses.iter().map(|s| s.order)).map_err(|e| {
        CoreError::Validation(format!("Resulting statuses were out of order: {e}"))
    })?;

    statuses.sort_by(by_key(|s: &StatusEntry| s.order));

    Ok(BatchOutcome {
        statuses,
        deleted_ids,
        changes,
        new_statuses,
    })
}

/// The statuses a freshly created project starts with, in order.
pub fn default_statuses() -> Vec<NewStatus> {
    DEFAULT_STATUSES
        .iter()
        .map(|&(name, order)| NewStatus {
            name: name.to_string(),
            order,
        })
        .collect()
}
