//! Error types for relation creation.
//!
//! Resolution, generation assignment, and layout never fail; they degrade
//! gracefully and report [`Warning`](kindred_core::warning::Warning)s.
//! Creating a relationship is the one operation that can be rejected, and it
//! always fails with a structured, user-actionable [`RelationError`].

use thiserror::Error;

use kindred_core::{identifier::Id, member::Date, relation::RelationKind};

/// A rejected relationship creation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelationError {
    /// The requested parent/child direction contradicts the recorded birth
    /// dates. Carries the direction that would be chronologically valid.
    #[error(
        "{source} (born {source_birth}) cannot be the {requested} of {target} (born {target_birth}); \
         the valid direction would be {suggested}"
    )]
    Chronology {
        source: Id,
        target: Id,
        requested: RelationKind,
        suggested: RelationKind,
        source_birth: Date,
        target_birth: Date,
    },

    /// The pair already has a recorded relationship.
    #[error("{source} and {target} already have a recorded relationship ({existing})")]
    Duplicate {
        source: Id,
        target: Id,
        existing: RelationKind,
    },

    /// Source and target are the same member.
    #[error("{member} cannot be related to themselves")]
    SelfRelation { member: Id },

    /// The referenced member does not exist in the store.
    #[error("unknown member: {member}")]
    UnknownMember { member: Id },
}

impl RelationError {
    /// Returns the corrected kind for chronology violations.
    ///
    /// Callers can retry with this kind, or request auto-correction up front
    /// via [`CreationOptions`](crate::creation::CreationOptions).
    pub fn suggested_kind(&self) -> Option<RelationKind> {
        match self {
            RelationError::Chronology { suggested, .. } => Some(*suggested),
            _ => None,
        }
    }
}
