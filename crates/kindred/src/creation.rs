//! Chronology-validated relationship creation.
//!
//! Creating a relationship is the one engine operation that can fail. The
//! persistence layer stays behind the [`RelationStore`] trait; the engine
//! validates the request against the store's current snapshot, optionally
//! corrects a chronologically impossible parent/child direction, and persists
//! both mirrored rows.

use log::{debug, info};

use kindred_core::{
    identifier::Id,
    member::Member,
    relation::{RawRelation, RelationKind},
};

use crate::error::RelationError;

/// Persistence seam for relationship creation.
///
/// Implemented by the storage layer; [`MemoryStore`] is the in-memory
/// implementation used by tests and the CLI.
pub trait RelationStore {
    /// Returns the current member snapshot.
    fn members(&self) -> &[Member];

    /// Returns the current relation snapshot.
    fn relations(&self) -> &[RawRelation];

    /// Persists one directed row and returns its identifier.
    fn insert_relation(&mut self, source: Id, target: Id, kind: RelationKind) -> Id;
}

/// In-memory relation store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    members: Vec<Member>,
    relations: Vec<RawRelation>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with members.
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            members,
            relations: Vec::new(),
        }
    }

    /// Adds a member.
    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Adds a pre-existing relation row.
    pub fn add_relation(&mut self, relation: RawRelation) {
        self.relations.push(relation);
    }
}

impl RelationStore for MemoryStore {
    fn members(&self) -> &[Member] {
        &self.members
    }

    fn relations(&self) -> &[RawRelation] {
        &self.relations
    }

    fn insert_relation(&mut self, source: Id, target: Id, kind: RelationKind) -> Id {
        let id = Id::synthetic(self.relations.len());
        self.relations
            .push(RawRelation::new(id, source, target, kind));
        id
    }
}

/// Options for smart creation.
#[derive(Debug, Clone, Copy)]
pub struct CreationOptions {
    auto_correct: bool,
}

impl Default for CreationOptions {
    /// Auto-correction is on by default.
    fn default() -> Self {
        Self { auto_correct: true }
    }
}

impl CreationOptions {
    /// Options that reject chronology violations instead of correcting them.
    pub fn strict() -> Self {
        Self {
            auto_correct: false,
        }
    }

    /// Sets whether a chronologically impossible direction is swapped.
    pub fn with_auto_correct(mut self, auto_correct: bool) -> Self {
        self.auto_correct = auto_correct;
        self
    }

    /// Returns `true` if auto-correction is enabled.
    pub fn auto_correct(&self) -> bool {
        self.auto_correct
    }
}

/// The outcome of a successful smart creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmartCreation {
    relation_id: Id,
    actual_kind: RelationKind,
    corrected: bool,
}

impl SmartCreation {
    /// Returns the identifier of the persisted forward row.
    pub fn relation_id(&self) -> Id {
        self.relation_id
    }

    /// Returns the kind that was actually applied (the source's role).
    pub fn actual_kind(&self) -> RelationKind {
        self.actual_kind
    }

    /// Returns `true` if the requested direction was swapped.
    pub fn corrected(&self) -> bool {
        self.corrected
    }
}

fn find_member(members: &[Member], id: Id) -> Result<&Member, RelationError> {
    members
        .iter()
        .find(|m| m.id() == id)
        .ok_or(RelationError::UnknownMember { member: id })
}

/// Creates a relationship with validation and optional direction correction.
///
/// The requested `kind` is the source's role toward the target. Validation
/// order: unknown members, self-relation, duplicate pair, chronology. A
/// parent/child request whose direction contradicts the two birth dates is
/// swapped once when auto-correction is enabled, and rejected with the
/// suggested direction otherwise. Equal or missing birth dates skip the
/// chronological check entirely.
///
/// On success both mirrored rows are persisted and the applied direction is
/// reported.
pub fn create_relationship_smart(
    store: &mut dyn RelationStore,
    source: Id,
    target: Id,
    kind: RelationKind,
    options: CreationOptions,
) -> Result<SmartCreation, RelationError> {
    let source_member = find_member(store.members(), source)?;
    let target_member = find_member(store.members(), target)?;

    if source == target {
        return Err(RelationError::SelfRelation { member: source });
    }

    if let Some(existing) = store.relations().iter().find(|r| r.touches_pair(source, target)) {
        // Report the existing kind from the requester's perspective.
        let existing_kind = if existing.source() == source {
            existing.kind()
        } else {
            existing.kind().inverse()
        };
        return Err(RelationError::Duplicate {
            source,
            target,
            existing: existing_kind,
        });
    }

    let mut actual_kind = kind;
    let mut corrected = false;

    if kind.is_directional() {
        if let (Some(source_birth), Some(target_birth)) =
            (source_member.birth_date(), target_member.birth_date())
        {
            if source_birth != target_birth {
                // The parent must be born strictly first.
                let valid = if kind == RelationKind::Parent {
                    source_birth < target_birth
                } else {
                    target_birth < source_birth
                };

                if !valid {
                    let suggested = kind.inverse();
                    if !options.auto_correct() {
                        return Err(RelationError::Chronology {
                            source,
                            target,
                            requested: kind,
                            suggested,
                            source_birth,
                            target_birth,
                        });
                    }

                    info!(
                        source = source.to_string(),
                        target = target.to_string(),
                        requested = kind.to_string(),
                        applied = suggested.to_string();
                        "Corrected relationship direction"
                    );
                    actual_kind = suggested;
                    corrected = true;
                }
            } else {
                debug!("Equal birth dates, skipping chronological check");
            }
        } else {
            debug!("Missing birth date, skipping chronological check");
        }
    }

    let relation_id = store.insert_relation(source, target, actual_kind);
    store.insert_relation(target, source, actual_kind.inverse());

    Ok(SmartCreation {
        relation_id,
        actual_kind,
        corrected,
    })
}
