//! Data-quality warnings.
//!
//! Resolution and generation assignment never fail on malformed input; they
//! degrade gracefully and surface what they found as [`Warning`]s. A warning
//! is advisory: the computed maps remain usable, but the underlying records
//! deserve attention.

use std::fmt;

use crate::identifier::Id;

/// The closed set of data-quality findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Two raw rows disagree about the kind of the same member pair.
    ConflictingRecords,

    /// A member resolved to more than two parents.
    ExcessParents,

    /// A relationship cycle prevents a consistent generation assignment.
    UnresolvableCycle,

    /// A raw row relates a member to themselves and was skipped.
    SelfReferential,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WarningKind::ConflictingRecords => "conflicting-records",
            WarningKind::ExcessParents => "excess-parents",
            WarningKind::UnresolvableCycle => "unresolvable-cycle",
            WarningKind::SelfReferential => "self-referential",
        };
        write!(f, "{name}")
    }
}

/// An advisory finding about the relationship data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    kind: WarningKind,
    members: Vec<Id>,
    message: String,
}

impl Warning {
    /// Creates a warning touching the given members.
    pub fn new(kind: WarningKind, members: Vec<Id>, message: impl Into<String>) -> Self {
        Self {
            kind,
            members,
            message: message.into(),
        }
    }

    /// Returns the finding kind.
    pub fn kind(&self) -> WarningKind {
        self.kind
    }

    /// Returns the members the finding touches.
    pub fn members(&self) -> &[Id] {
        &self.members
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning[{}]: {}", self.kind, self.message)
    }
}
