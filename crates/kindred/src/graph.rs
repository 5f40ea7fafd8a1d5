//! Family graph queries over a [`Resolution`].
//!
//! [`FamilyGraph`] materializes the resolved per-member views as a directed
//! graph so the later stages can ask structural questions: who are a member's
//! parents, children, spouses, or siblings, and which members form a
//! connected branch. Edges carry the resolved [`RelationKind`] as weight; one
//! edge per (member, other) pair and direction, mirroring the deduplicated
//! resolution.

use std::collections::HashMap;

use petgraph::{
    graph::{DiGraph, NodeIndex},
    unionfind::UnionFind,
    visit::EdgeRef,
};

use kindred_core::{identifier::Id, relation::RelationKind};

use crate::resolve::Resolution;

/// Directed graph of resolved relationships.
#[derive(Debug)]
pub struct FamilyGraph {
    graph: DiGraph<Id, RelationKind>,
    indices: HashMap<Id, NodeIndex>,
}

impl FamilyGraph {
    /// Builds the graph from a resolution.
    ///
    /// Nodes follow the resolution's member order; edges point from each
    /// member to its related members, weighted by the resolved kind.
    /// Relations toward members absent from the resolution are dropped.
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let mut graph = DiGraph::new();
        let mut indices = HashMap::with_capacity(resolution.len());

        for member in resolution.members() {
            let idx = graph.add_node(member);
            indices.insert(member, idx);
        }

        for (member, relations) in resolution.iter() {
            let source = indices[&member];
            for relation in relations {
                if let Some(&target) = indices.get(&relation.other()) {
                    graph.add_edge(source, target, relation.kind());
                }
            }
        }

        Self { graph, indices }
    }

    /// Returns the related members of `member` with the given resolved kind.
    pub fn relatives(&self, member: Id, kind: RelationKind) -> Vec<Id> {
        let Some(&idx) = self.indices.get(&member) else {
            return Vec::new();
        };

        self.graph
            .edges(idx)
            .filter(|edge| *edge.weight() == kind)
            .map(|edge| self.graph[edge.target()])
            .collect()
    }

    /// Returns the member's parents.
    pub fn parents(&self, member: Id) -> Vec<Id> {
        self.relatives(member, RelationKind::Parent)
    }

    /// Returns the member's children.
    pub fn children(&self, member: Id) -> Vec<Id> {
        self.relatives(member, RelationKind::Child)
    }

    /// Returns the member's spouses.
    pub fn spouses(&self, member: Id) -> Vec<Id> {
        self.relatives(member, RelationKind::Spouse)
    }

    /// Returns the member's siblings.
    pub fn siblings(&self, member: Id) -> Vec<Id> {
        self.relatives(member, RelationKind::Sibling)
    }

    /// Returns `true` if the two members have any resolved relation.
    pub fn related(&self, a: Id, b: Id) -> bool {
        match (self.indices.get(&a), self.indices.get(&b)) {
            (Some(&ia), Some(&ib)) => self.graph.contains_edge(ia, ib),
            _ => false,
        }
    }

    /// Partitions `members` into branches: maximal groups connected to each
    /// other through resolved relations, disconnected from every other group.
    ///
    /// Branches are ordered by their first member in the given slice, and
    /// members keep the slice order within a branch. Connectivity is judged
    /// over the whole graph, so two members of one branch need not be linked
    /// through the given subset alone.
    pub fn branches(&self, members: &[Id]) -> Vec<Vec<Id>> {
        let mut union = UnionFind::new(self.graph.node_count());
        for edge in self.graph.edge_references() {
            union.union(edge.source().index(), edge.target().index());
        }

        let mut branches: Vec<Vec<Id>> = Vec::new();
        let mut by_root: HashMap<usize, usize> = HashMap::new();

        for &member in members {
            let Some(&idx) = self.indices.get(&member) else {
                continue;
            };
            let root = union.find(idx.index());
            let slot = *by_root.entry(root).or_insert_with(|| {
                branches.push(Vec::new());
                branches.len() - 1
            });
            branches[slot].push(member);
        }

        branches
    }
}

#[cfg(test)]
mod tests {
    use kindred_core::{member::Member, relation::RawRelation};

    use crate::resolve::resolve_relations;

    use super::*;

    fn member(id: &str) -> Member {
        Member::new(Id::new(id), id, "Test")
    }

    fn row(id: &str, source: &str, kind: RelationKind, target: &str) -> RawRelation {
        RawRelation::new(Id::new(id), Id::new(source), Id::new(target), kind)
    }

    fn family() -> (Vec<Member>, Vec<RawRelation>) {
        let members = vec![
            member("mother"),
            member("father"),
            member("kid1"),
            member("kid2"),
            member("hermit"),
        ];
        let relations = vec![
            row("r1", "mother", RelationKind::Spouse, "father"),
            row("r2", "mother", RelationKind::Parent, "kid1"),
            row("r3", "mother", RelationKind::Parent, "kid2"),
            row("r4", "kid1", RelationKind::Sibling, "kid2"),
        ];
        (members, relations)
    }

    #[test]
    fn test_kind_filtered_queries() {
        let (members, relations) = family();
        let resolution = resolve_relations(&members, &relations);
        let graph = FamilyGraph::from_resolution(&resolution);

        assert_eq!(graph.parents(Id::new("kid1")), vec![Id::new("mother")]);
        assert_eq!(graph.spouses(Id::new("mother")), vec![Id::new("father")]);
        assert_eq!(graph.siblings(Id::new("kid2")), vec![Id::new("kid1")]);

        let mut kids = graph.children(Id::new("mother"));
        kids.sort_by_key(|id| id.to_string());
        assert_eq!(kids, vec![Id::new("kid1"), Id::new("kid2")]);
    }

    #[test]
    fn test_related_is_direct_adjacency() {
        let (members, relations) = family();
        let resolution = resolve_relations(&members, &relations);
        let graph = FamilyGraph::from_resolution(&resolution);

        assert!(graph.related(Id::new("mother"), Id::new("kid1")));
        assert!(graph.related(Id::new("kid1"), Id::new("mother")));
        assert!(!graph.related(Id::new("father"), Id::new("kid1")));
        assert!(!graph.related(Id::new("mother"), Id::new("hermit")));
    }

    #[test]
    fn test_branches_split_disconnected_groups() {
        let (members, relations) = family();
        let resolution = resolve_relations(&members, &relations);
        let graph = FamilyGraph::from_resolution(&resolution);

        let ids: Vec<Id> = members.iter().map(Member::id).collect();
        let branches = graph.branches(&ids);

        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0].len(), 4);
        assert_eq!(branches[1], vec![Id::new("hermit")]);
    }

    #[test]
    fn test_branches_respect_subset() {
        let (members, relations) = family();
        let resolution = resolve_relations(&members, &relations);
        let graph = FamilyGraph::from_resolution(&resolution);

        // kid1 and kid2 stay one branch even when queried without the
        // parents that connect them.
        let branches = graph.branches(&[Id::new("kid1"), Id::new("kid2")]);
        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn test_unknown_members_are_ignored() {
        let (members, relations) = family();
        let resolution = resolve_relations(&members, &relations);
        let graph = FamilyGraph::from_resolution(&resolution);

        assert!(graph.parents(Id::new("ghost")).is_empty());
        assert!(graph.branches(&[Id::new("ghost")]).is_empty());
    }
}
