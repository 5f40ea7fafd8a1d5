//! Relation kinds and relation records.
//!
//! [`RelationKind`] is the closed set of relationship tags with one central,
//! total [`inverse`](RelationKind::inverse). Every perspective flip in the
//! engine goes through this single function; there is deliberately no string
//! dispatch anywhere.
//!
//! A [`RawRelation`] is a directed row as stored: the kind describes the
//! *source's role toward the target*, so `(ada, Parent, bob)` records that
//! Ada is Bob's parent. Every semantic relationship is expected to be stored
//! as two mirrored rows, but nothing in the engine relies on the mirror being
//! present, unique, or consistent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::Id;

/// The closed set of relationship tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Parent,
    Child,
    Spouse,
    Sibling,
}

impl RelationKind {
    /// Returns the kind seen from the other end of the relationship.
    ///
    /// Parent and child swap; spouse and sibling are their own inverses.
    pub fn inverse(self) -> Self {
        match self {
            RelationKind::Parent => RelationKind::Child,
            RelationKind::Child => RelationKind::Parent,
            RelationKind::Spouse => RelationKind::Spouse,
            RelationKind::Sibling => RelationKind::Sibling,
        }
    }

    /// Returns `true` for kinds where direction matters (parent/child).
    pub fn is_directional(self) -> bool {
        matches!(self, RelationKind::Parent | RelationKind::Child)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::Parent => "parent",
            RelationKind::Child => "child",
            RelationKind::Spouse => "spouse",
            RelationKind::Sibling => "sibling",
        };
        write!(f, "{name}")
    }
}

/// A directed relation row as stored by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelation {
    id: Id,
    source: Id,
    target: Id,
    kind: RelationKind,
}

impl RawRelation {
    /// Creates a relation row.
    pub fn new(id: Id, source: Id, target: Id, kind: RelationKind) -> Self {
        Self {
            id,
            source,
            target,
            kind,
        }
    }

    /// Returns the row identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the source member.
    pub fn source(&self) -> Id {
        self.source
    }

    /// Returns the target member.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns the stored kind (the source's role toward the target).
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Returns `true` if the row connects the given unordered pair.
    pub fn touches_pair(&self, a: Id, b: Id) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// A relationship expressed from one member's own point of view.
///
/// The kind records what the *other* member is to the owning member: a
/// resolved `(Parent, bob)` entry in Ada's list means Bob is Ada's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRelation {
    kind: RelationKind,
    other: Id,
    raw_id: Id,
}

impl ResolvedRelation {
    /// Creates a resolved relation toward `other`, backed by raw row `raw_id`.
    pub fn new(kind: RelationKind, other: Id, raw_id: Id) -> Self {
        Self {
            kind,
            other,
            raw_id,
        }
    }

    /// Returns what the other member is to the owning member.
    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Returns the other member's identifier.
    pub fn other(&self) -> Id {
        self.other
    }

    /// Returns the identifier of the raw row this entry was derived from.
    pub fn raw_id(&self) -> Id {
        self.raw_id
    }
}
