//! Relationship resolution.
//!
//! Turns the flat list of stored [`RawRelation`] rows into a per-member view:
//! for every member, an ordered list of [`ResolvedRelation`]s expressed from
//! that member's own point of view, with at most one entry per related
//! member. The stored rows are directed and frequently inconsistent (missing
//! mirrors, duplicated rows, contradictory kinds); resolution never fails on
//! any of that, it normalizes what it can and reports the rest as
//! data-quality warnings.
//!
//! Perspective rule: a stored row `(source, kind, target)` records the
//! source's role toward the target. Seen from the source the other member is
//! therefore `kind.inverse()`; seen from the target the other member is
//! `kind` as-is. Both derivations agree whenever the mirrored row pair is
//! well formed.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;

use kindred_core::{
    identifier::Id,
    member::Member,
    relation::{RawRelation, RelationKind, ResolvedRelation},
    warning::{Warning, WarningKind},
};

/// The per-member view of all relationships.
///
/// Member order follows the input member list; each member's relations are
/// ordered by first appearance in the raw relation list.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    by_member: IndexMap<Id, Vec<ResolvedRelation>>,
    warnings: Vec<Warning>,
}

impl Resolution {
    /// Returns the resolved relations of `member`, empty if unknown.
    pub fn relations_of(&self, member: Id) -> &[ResolvedRelation] {
        self.by_member
            .get(&member)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if the member appeared in the input member list.
    pub fn contains(&self, member: Id) -> bool {
        self.by_member.contains_key(&member)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.by_member.len()
    }

    /// Returns `true` if no members were resolved.
    pub fn is_empty(&self) -> bool {
        self.by_member.is_empty()
    }

    /// Iterates members in input order with their resolved relations.
    pub fn iter(&self) -> impl Iterator<Item = (Id, &[ResolvedRelation])> {
        self.by_member
            .iter()
            .map(|(id, relations)| (*id, relations.as_slice()))
    }

    /// Iterates member identifiers in input order.
    pub fn members(&self) -> impl Iterator<Item = Id> + '_ {
        self.by_member.keys().copied()
    }

    /// Returns the data-quality warnings accumulated during resolution.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// One member's working state during resolution.
///
/// Tracks, per related member, where in the ordered output the entry sits and
/// whether it was derived from a row the member authored as source.
struct MemberView {
    entries: Vec<ResolvedRelation>,
    slots: IndexMap<Id, (usize, bool)>,
}

impl MemberView {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            slots: IndexMap::new(),
        }
    }

    /// Applies one candidate relation, returning a conflicting previous kind
    /// if the candidate disagreed with an already-recorded entry.
    fn apply(
        &mut self,
        candidate: ResolvedRelation,
        from_source: bool,
    ) -> Option<RelationKind> {
        match self.slots.get_mut(&candidate.other()) {
            None => {
                self.slots
                    .insert(candidate.other(), (self.entries.len(), from_source));
                self.entries.push(candidate);
                None
            }
            Some((slot, was_source)) => {
                let existing = self.entries[*slot];
                let conflict = existing.kind() != candidate.kind();

                // A directional claim authored by this member overrides one
                // inferred from being the target of someone else's row.
                if candidate.kind().is_directional() && from_source && !*was_source {
                    self.entries[*slot] = candidate;
                    *was_source = true;
                }

                conflict.then_some(existing.kind())
            }
        }
    }
}

/// Resolves raw relation rows into per-member relation views.
///
/// Every member of `members` is present in the output, even with no
/// relations. Rows referencing unknown members contribute only to the views
/// of members that do exist; self-referential rows are skipped with a
/// warning.
pub fn resolve_relations(members: &[Member], relations: &[RawRelation]) -> Resolution {
    debug!(
        members = members.len(),
        relations = relations.len();
        "Resolving relationships"
    );

    let mut warnings = Vec::new();
    let mut conflict_pairs: HashSet<(Id, Id)> = HashSet::new();

    for row in relations {
        if row.source() == row.target() {
            warnings.push(Warning::new(
                WarningKind::SelfReferential,
                vec![row.source()],
                format!("relation {} relates {} to themselves", row.id(), row.source()),
            ));
        }
    }

    let mut views: IndexMap<Id, MemberView> = members
        .iter()
        .map(|member| (member.id(), MemberView::new()))
        .collect();

    for row in relations {
        if row.source() == row.target() {
            continue;
        }

        // From the source's point of view the target is the inverse of the
        // stored kind; from the target's it is the stored kind itself.
        let candidates = [
            (
                row.source(),
                ResolvedRelation::new(row.kind().inverse(), row.target(), row.id()),
                true,
            ),
            (
                row.target(),
                ResolvedRelation::new(row.kind(), row.source(), row.id()),
                false,
            ),
        ];

        for (owner, candidate, from_source) in candidates {
            let Some(view) = views.get_mut(&owner) else {
                continue;
            };

            if let Some(previous) = view.apply(candidate, from_source) {
                if conflict_pairs.insert((owner, candidate.other())) {
                    conflict_pairs.insert((candidate.other(), owner));
                    warnings.push(Warning::new(
                        WarningKind::ConflictingRecords,
                        vec![owner, candidate.other()],
                        format!(
                            "{owner} and {} have contradictory relation records ({previous} vs {})",
                            candidate.other(),
                            candidate.kind(),
                        ),
                    ));
                }
            }
        }
    }

    let by_member: IndexMap<Id, Vec<ResolvedRelation>> = views
        .into_iter()
        .map(|(id, view)| (id, view.entries))
        .collect();

    for (id, entries) in &by_member {
        let parents = entries
            .iter()
            .filter(|r| r.kind() == RelationKind::Parent)
            .count();
        if parents > 2 {
            warnings.push(Warning::new(
                WarningKind::ExcessParents,
                vec![*id],
                format!("{id} has {parents} recorded parents"),
            ));
        }
    }

    debug!(warnings = warnings.len(); "Resolution complete");

    Resolution {
        by_member,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use kindred_core::member::Member;

    use super::*;

    fn member(id: &str) -> Member {
        Member::new(Id::new(id), id, "Test")
    }

    fn row(id: &str, source: &str, kind: RelationKind, target: &str) -> RawRelation {
        RawRelation::new(Id::new(id), Id::new(source), Id::new(target), kind)
    }

    #[test]
    fn test_perspective_inversion_from_source() {
        // Stored: ada is bob's parent. From ada's view bob is her child.
        let members = [member("ada"), member("bob")];
        let relations = [row("r1", "ada", RelationKind::Parent, "bob")];

        let resolution = resolve_relations(&members, &relations);

        let ada = resolution.relations_of(Id::new("ada"));
        assert_eq!(ada.len(), 1);
        assert_eq!(ada[0].kind(), RelationKind::Child);
        assert_eq!(ada[0].other(), Id::new("bob"));
        assert_eq!(ada[0].raw_id(), Id::new("r1"));

        let bob = resolution.relations_of(Id::new("bob"));
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].kind(), RelationKind::Parent);
        assert_eq!(bob[0].other(), Id::new("ada"));
    }

    #[test]
    fn test_mirrored_rows_collapse_to_one_entry_each() {
        let members = [member("ada"), member("bob")];
        let relations = [
            row("r1", "ada", RelationKind::Parent, "bob"),
            row("r2", "bob", RelationKind::Child, "ada"),
        ];

        let resolution = resolve_relations(&members, &relations);

        assert_eq!(resolution.relations_of(Id::new("ada")).len(), 1);
        assert_eq!(resolution.relations_of(Id::new("bob")).len(), 1);
        assert!(resolution.warnings().is_empty());
    }

    #[test]
    fn test_authored_directional_claim_overrides_inferred_one() {
        // First row makes ada see bob as parent (inferred: ada is target).
        // Second row is ada's own claim that she is bob's parent; it must win.
        let members = [member("ada"), member("bob")];
        let relations = [
            row("r1", "bob", RelationKind::Parent, "ada"),
            row("r2", "ada", RelationKind::Parent, "bob"),
        ];

        let resolution = resolve_relations(&members, &relations);

        let ada = resolution.relations_of(Id::new("ada"));
        assert_eq!(ada.len(), 1);
        assert_eq!(ada[0].kind(), RelationKind::Child);
        assert_eq!(ada[0].raw_id(), Id::new("r2"));

        let conflicts: Vec<_> = resolution
            .warnings()
            .iter()
            .filter(|w| w.kind() == WarningKind::ConflictingRecords)
            .collect();
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_bidirectional_kinds_never_overwrite() {
        let members = [member("ada"), member("bob")];
        let relations = [
            row("r1", "bob", RelationKind::Sibling, "ada"),
            row("r2", "ada", RelationKind::Spouse, "bob"),
        ];

        let resolution = resolve_relations(&members, &relations);

        // The sibling entry was seen first and stays.
        let ada = resolution.relations_of(Id::new("ada"));
        assert_eq!(ada.len(), 1);
        assert_eq!(ada[0].kind(), RelationKind::Sibling);
        assert!(
            resolution
                .warnings()
                .iter()
                .any(|w| w.kind() == WarningKind::ConflictingRecords)
        );
    }

    #[test]
    fn test_self_referential_rows_are_skipped_with_warning() {
        let members = [member("ada")];
        let relations = [row("r1", "ada", RelationKind::Spouse, "ada")];

        let resolution = resolve_relations(&members, &relations);

        assert!(resolution.relations_of(Id::new("ada")).is_empty());
        assert_eq!(resolution.warnings().len(), 1);
        assert_eq!(
            resolution.warnings()[0].kind(),
            WarningKind::SelfReferential
        );
    }

    #[test]
    fn test_rows_touching_unknown_members_are_tolerated() {
        let members = [member("ada")];
        let relations = [row("r1", "ada", RelationKind::Parent, "ghost")];

        let resolution = resolve_relations(&members, &relations);

        // Ada still gets her half of the relation; the ghost has no view.
        let ada = resolution.relations_of(Id::new("ada"));
        assert_eq!(ada.len(), 1);
        assert_eq!(ada[0].other(), Id::new("ghost"));
        assert!(!resolution.contains(Id::new("ghost")));
    }

    #[test]
    fn test_excess_parents_surface_as_warning() {
        let members = [member("kid"), member("p1"), member("p2"), member("p3")];
        let relations = [
            row("r1", "p1", RelationKind::Parent, "kid"),
            row("r2", "p2", RelationKind::Parent, "kid"),
            row("r3", "p3", RelationKind::Parent, "kid"),
        ];

        let resolution = resolve_relations(&members, &relations);

        assert_eq!(resolution.relations_of(Id::new("kid")).len(), 3);
        let excess: Vec<_> = resolution
            .warnings()
            .iter()
            .filter(|w| w.kind() == WarningKind::ExcessParents)
            .collect();
        assert_eq!(excess.len(), 1);
        assert_eq!(excess[0].members(), &[Id::new("kid")]);
    }

    #[test]
    fn test_every_member_is_present_even_without_relations() {
        let members = [member("ada"), member("hermit")];
        let resolution = resolve_relations(&members, &[]);

        assert!(resolution.contains(Id::new("hermit")));
        assert!(resolution.relations_of(Id::new("hermit")).is_empty());
        assert_eq!(resolution.len(), 2);
    }

    mod properties {
        use std::collections::HashSet;

        use proptest::prelude::*;

        use super::*;

        fn any_kind() -> impl Strategy<Value = RelationKind> {
            prop_oneof![
                Just(RelationKind::Parent),
                Just(RelationKind::Child),
                Just(RelationKind::Spouse),
                Just(RelationKind::Sibling),
            ]
        }

        proptest! {
            /// Storage variants of consistent relationships (forward row
            /// only, mirror only, or both) always resolve to complementary
            /// per-member views with at most one entry per pair.
            #[test]
            fn consistent_rows_resolve_to_complementary_views(
                specs in proptest::collection::vec((0usize..6, any_kind(), 0usize..3), 0..10)
            ) {
                const PAIRS: [(usize, usize); 6] =
                    [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
                let names = ["m0", "m1", "m2", "m3"];
                let members: Vec<Member> = names.iter().map(|n| member(n)).collect();

                let mut taken = HashSet::new();
                let mut relations = Vec::new();
                for (slot, kind, mode) in specs {
                    if !taken.insert(slot) {
                        continue;
                    }
                    let (a, b) = PAIRS[slot];
                    let forward = RawRelation::new(
                        Id::new(&format!("f{slot}")),
                        Id::new(names[a]),
                        Id::new(names[b]),
                        kind,
                    );
                    let mirror = RawRelation::new(
                        Id::new(&format!("m{slot}")),
                        Id::new(names[b]),
                        Id::new(names[a]),
                        kind.inverse(),
                    );
                    match mode {
                        0 => relations.push(forward),
                        1 => relations.push(mirror),
                        _ => {
                            relations.push(forward);
                            relations.push(mirror);
                        }
                    }
                }

                let resolution = resolve_relations(&members, &relations);

                prop_assert!(
                    resolution
                        .warnings()
                        .iter()
                        .all(|w| w.kind() != WarningKind::ConflictingRecords)
                );

                for (owner, owner_relations) in resolution.iter() {
                    let mut others = HashSet::new();
                    for relation in owner_relations {
                        prop_assert!(others.insert(relation.other()));

                        let back = resolution
                            .relations_of(relation.other())
                            .iter()
                            .find(|r| r.other() == owner);
                        if let Some(back) = back {
                            prop_assert_eq!(back.kind(), relation.kind().inverse());
                        }
                    }
                }
            }
        }
    }
}
