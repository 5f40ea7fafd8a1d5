//! Generation (depth) assignment.
//!
//! Assigns every member reachable from a chosen root an integer generation:
//! the root sits at 0, descendants grow positive, ancestors negative. The
//! assignment is a worklist fixed point over the resolved relations: parent
//! edges relax toward the minimum, child edges toward the maximum, and
//! spouses/siblings adopt their partner's generation when still unassigned.
//! A member whose assignment changes is re-enqueued so the tighter value
//! propagates.
//!
//! Malformed data can contain cycles that admit no consistent assignment.
//! Termination is guaranteed by a per-member expansion budget (the member
//! count, the Bellman-Ford bound); members that exhaust it keep their last
//! value and are reported in an [`WarningKind::UnresolvableCycle`] warning.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use kindred_core::{
    identifier::Id,
    member::Member,
    relation::RelationKind,
    warning::{Warning, WarningKind},
};

use crate::resolve::Resolution;

/// Member id to signed generation, plus traversal warnings.
///
/// Members not connected to the traversal root are absent; with multi-root
/// family data that is expected, not an error.
#[derive(Debug, Clone, Default)]
pub struct GenerationMap {
    generations: HashMap<Id, i32>,
    warnings: Vec<Warning>,
}

impl GenerationMap {
    /// Returns the generation of `member`, if reachable.
    pub fn get(&self, member: Id) -> Option<i32> {
        self.generations.get(&member).copied()
    }

    /// Returns `true` if the member was reached.
    pub fn contains(&self, member: Id) -> bool {
        self.generations.contains_key(&member)
    }

    /// Returns the number of assigned members.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Returns `true` if nothing was assigned.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Iterates assigned members in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (Id, i32)> + '_ {
        self.generations.iter().map(|(id, g)| (*id, *g))
    }

    /// Returns the data-quality warnings accumulated during traversal.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// Worklist state for one assignment run.
struct Assigner<'a> {
    resolution: &'a Resolution,
    generations: HashMap<Id, i32>,
    expansions: HashMap<Id, usize>,
    queue: VecDeque<Id>,
    exhausted: Vec<Id>,
    budget: usize,
}

impl<'a> Assigner<'a> {
    fn new(resolution: &'a Resolution) -> Self {
        Self {
            resolution,
            generations: HashMap::new(),
            expansions: HashMap::new(),
            queue: VecDeque::new(),
            exhausted: Vec::new(),
            budget: resolution.len().max(1),
        }
    }

    /// Seeds `member` at `generation` if it has none yet.
    fn seed(&mut self, member: Id, generation: i32) {
        if self.resolution.contains(member) && !self.generations.contains_key(&member) {
            self.generations.insert(member, generation);
            self.queue.push_back(member);
        }
    }

    /// Drains the worklist to its fixed point (or the expansion budget).
    fn run(&mut self) {
        let mut flagged: HashSet<Id> = HashSet::new();

        while let Some(id) = self.queue.pop_front() {
            let Some(&generation) = self.generations.get(&id) else {
                continue;
            };

            let count = self.expansions.entry(id).or_insert(0);
            if *count >= self.budget {
                if flagged.insert(id) {
                    self.exhausted.push(id);
                }
                continue;
            }
            *count += 1;

            for relation in self.resolution.relations_of(id) {
                let other = relation.other();
                if !self.resolution.contains(other) {
                    continue;
                }

                let current = self.generations.get(&other).copied();
                let update = match relation.kind() {
                    // The related member is a parent: push it at least one
                    // generation above, always keeping the minimum.
                    RelationKind::Parent => {
                        let candidate = generation - 1;
                        match current {
                            None => Some(candidate),
                            Some(cur) if cur > candidate => Some(candidate),
                            _ => None,
                        }
                    }
                    // Symmetric maximum rule for children.
                    RelationKind::Child => {
                        let candidate = generation + 1;
                        match current {
                            None => Some(candidate),
                            Some(cur) if cur < candidate => Some(candidate),
                            _ => None,
                        }
                    }
                    // Partners and siblings share the generation, but never
                    // displace an existing assignment.
                    RelationKind::Spouse | RelationKind::Sibling => match current {
                        None => Some(generation),
                        _ => None,
                    },
                };

                if let Some(new_generation) = update {
                    self.generations.insert(other, new_generation);
                    self.queue.push_back(other);
                }
            }
        }
    }

    fn finish(self) -> GenerationMap {
        let mut warnings = Vec::new();
        if !self.exhausted.is_empty() {
            let names = self
                .exhausted
                .iter()
                .map(Id::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            warnings.push(Warning::new(
                WarningKind::UnresolvableCycle,
                self.exhausted,
                format!("relationship cycle prevents a consistent generation for: {names}"),
            ));
        }

        debug!(assigned = self.generations.len(); "Generation assignment complete");

        GenerationMap {
            generations: self.generations,
            warnings,
        }
    }
}

/// Assigns generations to every member reachable from `root`.
///
/// An unknown root yields an empty map.
pub fn assign_generations(resolution: &Resolution, root: Id) -> GenerationMap {
    debug!(root = root.to_string(); "Assigning generations");

    let mut assigner = Assigner::new(resolution);
    assigner.seed(root, 0);
    assigner.run();
    assigner.finish()
}

/// Assigns a generation to every member, not only those reachable from `root`.
///
/// The root's component is assigned exactly as [`assign_generations`]; each
/// remaining disconnected branch is then seeded from its first member in
/// input order. The seed generation is estimated from the birth-year gap to
/// the root divided by `years_per_generation` when both birth dates are
/// known, so disconnected branches land at a chronologically plausible depth;
/// otherwise the branch starts at 0.
pub fn assign_generations_all(
    members: &[Member],
    resolution: &Resolution,
    root: Id,
    years_per_generation: f32,
) -> GenerationMap {
    let root_birth = members
        .iter()
        .find(|m| m.id() == root)
        .and_then(Member::birth_date);

    let mut assigner = Assigner::new(resolution);
    assigner.seed(root, 0);
    assigner.run();

    for member in members {
        if assigner.generations.contains_key(&member.id()) {
            continue;
        }

        let seed = match (root_birth, member.birth_date()) {
            (Some(root_date), Some(birth)) if years_per_generation > 0.0 => {
                let gap = (birth.year() - root_date.year()) as f32;
                (gap / years_per_generation).round() as i32
            }
            _ => 0,
        };

        debug!(
            branch_root = member.id().to_string(),
            seed = seed;
            "Seeding disconnected branch"
        );
        assigner.seed(member.id(), seed);
        assigner.run();
    }

    assigner.finish()
}

#[cfg(test)]
mod tests {
    use kindred_core::{member::Date, relation::RawRelation};

    use crate::resolve::resolve_relations;

    use super::*;

    fn member(id: &str) -> Member {
        Member::new(Id::new(id), id, "Test")
    }

    fn member_born(id: &str, year: i32) -> Member {
        member(id).with_birth_date(Date::from_year(year))
    }

    fn row(id: &str, source: &str, kind: RelationKind, target: &str) -> RawRelation {
        RawRelation::new(Id::new(id), Id::new(source), Id::new(target), kind)
    }

    #[test]
    fn test_three_generation_chain() {
        // Grandparent (1920) -> parent (1950) -> child (1980), rooted at the
        // grandparent: generations 0, 1, 2.
        let members = [
            member_born("grandparent", 1920),
            member_born("parent", 1950),
            member_born("child", 1980),
        ];
        let relations = [
            row("r1", "grandparent", RelationKind::Parent, "parent"),
            row("r2", "parent", RelationKind::Child, "grandparent"),
            row("r3", "parent", RelationKind::Parent, "child"),
            row("r4", "child", RelationKind::Child, "parent"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("grandparent"));

        assert_eq!(generations.get(Id::new("grandparent")), Some(0));
        assert_eq!(generations.get(Id::new("parent")), Some(1));
        assert_eq!(generations.get(Id::new("child")), Some(2));
        assert!(generations.warnings().is_empty());
    }

    #[test]
    fn test_parent_edge_invariant_holds_from_any_root() {
        let members = [member("grandparent"), member("parent"), member("child")];
        let relations = [
            row("r1", "grandparent", RelationKind::Parent, "parent"),
            row("r2", "parent", RelationKind::Parent, "child"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("child"));

        // Rooting at the child puts ancestors at negative generations.
        assert_eq!(generations.get(Id::new("child")), Some(0));
        assert_eq!(generations.get(Id::new("parent")), Some(-1));
        assert_eq!(generations.get(Id::new("grandparent")), Some(-2));
    }

    #[test]
    fn test_consistent_diamond_needs_no_correction() {
        // Both of the root's parents descend from the same grandparent; every
        // path agrees on every depth.
        let members = [member("r"), member("m"), member("f"), member("g")];
        let relations = [
            row("r1", "m", RelationKind::Parent, "r"),
            row("r2", "f", RelationKind::Parent, "r"),
            row("r3", "m", RelationKind::Spouse, "f"),
            row("r4", "g", RelationKind::Parent, "m"),
            row("r5", "g", RelationKind::Parent, "f"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("r"));

        assert_eq!(generations.get(Id::new("r")), Some(0));
        assert_eq!(generations.get(Id::new("m")), Some(-1));
        assert_eq!(generations.get(Id::new("f")), Some(-1));
        assert_eq!(generations.get(Id::new("g")), Some(-2));
        assert!(generations.warnings().is_empty());
    }

    #[test]
    fn test_ancestor_shortcut_keeps_the_long_chain_consistent() {
        // g is recorded both as a's parent and as a's grandparent (via x),
        // which no assignment can satisfy. The minimum rule settles on depths
        // that keep every edge of the longer chain off by exactly one,
        // sacrificing only the shortcut edge.
        let members = [member("a"), member("x"), member("g")];
        let relations = [
            row("r1", "g", RelationKind::Parent, "a"),
            row("r2", "x", RelationKind::Parent, "a"),
            row("r3", "g", RelationKind::Parent, "x"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("a"));

        let a = generations.get(Id::new("a")).expect("a assigned");
        let x = generations.get(Id::new("x")).expect("x assigned");
        let g = generations.get(Id::new("g")).expect("g assigned");
        assert_eq!(x, a - 1);
        assert_eq!(g, x - 1);
    }

    #[test]
    fn test_descendant_shortcut_keeps_the_long_chain_consistent() {
        // Mirror case: d is recorded both as a's child and grandchild. The
        // maximum rule keeps the chain a -> x -> d consistent.
        let members = [member("a"), member("x"), member("d")];
        let relations = [
            row("r1", "a", RelationKind::Parent, "d"),
            row("r2", "a", RelationKind::Parent, "x"),
            row("r3", "x", RelationKind::Parent, "d"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("a"));

        let a = generations.get(Id::new("a")).expect("a assigned");
        let x = generations.get(Id::new("x")).expect("x assigned");
        let d = generations.get(Id::new("d")).expect("d assigned");
        assert_eq!(x, a + 1);
        assert_eq!(d, x + 1);
    }

    #[test]
    fn test_spouses_and_siblings_share_the_generation() {
        let members = [
            member("root"),
            member("partner"),
            member("kid1"),
            member("kid2"),
        ];
        let relations = [
            row("r1", "root", RelationKind::Spouse, "partner"),
            row("r2", "root", RelationKind::Parent, "kid1"),
            row("r3", "kid1", RelationKind::Sibling, "kid2"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("root"));

        assert_eq!(generations.get(Id::new("partner")), Some(0));
        assert_eq!(generations.get(Id::new("kid1")), Some(1));
        assert_eq!(generations.get(Id::new("kid2")), Some(1));
    }

    #[test]
    fn test_unreachable_members_are_absent() {
        let members = [member("root"), member("stranger")];
        let relations = [];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("root"));

        assert_eq!(generations.len(), 1);
        assert!(!generations.contains(Id::new("stranger")));
    }

    #[test]
    fn test_unknown_root_yields_empty_map() {
        let members = [member("a")];
        let resolution = resolve_relations(&members, &[]);
        let generations = assign_generations(&resolution, Id::new("nobody"));

        assert!(generations.is_empty());
    }

    #[test]
    fn test_contradictory_cycle_terminates_with_warning() {
        // Both rows claim to be the parent of the other; the resolved views
        // then see each other as children, which admits no consistent depth.
        let members = [member("a"), member("b")];
        let relations = [
            row("r1", "a", RelationKind::Parent, "b"),
            row("r2", "b", RelationKind::Parent, "a"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations = assign_generations(&resolution, Id::new("a"));

        // Terminates, both members keep some assignment, and the cycle is
        // surfaced as a data-quality warning rather than an error.
        assert!(generations.contains(Id::new("a")));
        assert!(generations.contains(Id::new("b")));
        assert!(
            generations
                .warnings()
                .iter()
                .any(|w| w.kind() == WarningKind::UnresolvableCycle)
        );
    }

    #[test]
    fn test_assign_all_covers_disconnected_branches() {
        let members = [
            member_born("root", 1950),
            member_born("kid", 1980),
            member_born("stranger", 2000),
            member_born("stranger_kid", 2025),
        ];
        let relations = [
            row("r1", "root", RelationKind::Parent, "kid"),
            row("r2", "stranger", RelationKind::Parent, "stranger_kid"),
        ];

        let resolution = resolve_relations(&members, &relations);
        let generations =
            assign_generations_all(&members, &resolution, Id::new("root"), 25.0);

        assert_eq!(generations.len(), 4);
        // (2000 - 1950) / 25 = 2 generations below the root.
        assert_eq!(generations.get(Id::new("stranger")), Some(2));
        assert_eq!(generations.get(Id::new("stranger_kid")), Some(3));
    }

    #[test]
    fn test_assign_all_without_birth_dates_seeds_at_zero() {
        let members = [member("root"), member("stranger")];
        let resolution = resolve_relations(&members, &[]);
        let generations =
            assign_generations_all(&members, &resolution, Id::new("root"), 25.0);

        assert_eq!(generations.get(Id::new("stranger")), Some(0));
    }
}
