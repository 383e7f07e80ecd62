//! Server-wide policies for the two ambiguous corners of a status mass edit:
//! ids that do not belong to the target project, and tickets left pointing
//! at a deleted status.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Foreign id policy
// ---------------------------------------------------------------------------

/// String label for [`ForeignIdPolicy::Ignore`].
pub const FOREIGN_ID_IGNORE: &str = "ignore";
/// String label for [`ForeignIdPolicy::Reject`].
pub const FOREIGN_ID_REJECT: &str = "reject";

/// How a mass edit treats status ids that are not part of the target project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForeignIdPolicy {
    /// Drop the offending ids and carry on with the rest of the batch.
    #[default]
    Ignore,
    /// Fail the whole batch with a not-found error.
    Reject,
}

impl ForeignIdPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => FOREIGN_ID_IGNORE,
            Self::Reject => FOREIGN_ID_REJECT,
        }
    }
}

impl FromStr for ForeignIdPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            FOREIGN_ID_IGNORE => Ok(Self::Ignore),
            FOREIGN_ID_REJECT => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Unknown foreign id policy: '{other}'. \
                 Valid policies: {FOREIGN_ID_IGNORE}, {FOREIGN_ID_REJECT}"
            ))),
        }
    }
}

impl fmt::Display for ForeignIdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Orphan ticket policy
// ---------------------------------------------------------------------------

/// String label for [`OrphanTicketPolicy::Reassign`].
pub const ORPHAN_REASSIGN: &str = "reassign";
/// String label for [`OrphanTicketPolicy::Block`].
pub const ORPHAN_BLOCK: &str = "block";
/// String label for [`OrphanTicketPolicy::Cascade`].
pub const ORPHAN_CASCADE: &str = "cascade";

/// All valid orphan policy labels.
pub const VALID_ORPHAN_POLICIES: &[&str] = &[ORPHAN_REASSIGN, ORPHAN_BLOCK, ORPHAN_CASCADE];

/// What happens to tickets whose status is deleted by a mass edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanTicketPolicy {
    /// Move them to the status at order 0 after the edit.
    #[default]
    Reassign,
    /// Refuse the edit while any ticket still references a deleted status.
    Block,
    /// Delete them together with their status.
    Cascade,
}

impl OrphanTicketPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reassign => ORPHAN_REASSIGN,
            Self::Block => ORPHAN_BLOCK,
            Self::Cascade => ORPHAN_CASCADE,
        }
    }
}

impl FromStr for OrphanTicketPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ORPHAN_REASSIGN => Ok(Self::Reassign),
            ORPHAN_BLOCK => Ok(Self::Block),
            ORPHAN_CASCADE => Ok(Self::Cascade),
            other => Err(CoreError::Validation(format!(
                "Unknown orphan ticket policy: '{other}'. Valid policies: {}",
                VALID_ORPHAN_POLICIES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OrphanTicketPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pair of policies a mass edit runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MassEditPolicy {
    pub foreign_ids: ForeignIdPolicy,
    pub orphans: OrphanTicketPolicy,
}
