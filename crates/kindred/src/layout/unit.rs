//! Family unit grouping within a generation row.
//!
//! A family unit is a member together with its spouse(s); sibling-linked
//! units are kept adjacent. [`arrange_row`] fixes the left-to-right order of
//! one generation row and tags every member with the gap that separates it
//! from its left neighbor.

use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use kindred_core::identifier::Id;

use crate::graph::FamilyGraph;

/// The separation between a row member and its left neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowGap {
    /// Within a family unit (spouses).
    Spouse,
    /// Between units of the same sibling group.
    Sibling,
    /// Between unrelated family units.
    Unit,
}

/// One member of an ordered generation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowEntry {
    pub(crate) id: Id,
    /// `None` for the first member of the row.
    pub(crate) gap_before: Option<RowGap>,
}

/// Orders a generation row into family units and sibling groups.
///
/// Spouse edges merge members into units; sibling edges between units merge
/// the units into groups. Units keep the order of their first member in the
/// input row, groups likewise, so the arrangement is deterministic for a
/// fixed member list.
pub(crate) fn arrange_row(row: &[Id], graph: &FamilyGraph) -> Vec<RowEntry> {
    if row.is_empty() {
        return Vec::new();
    }

    let index: HashMap<Id, usize> = row.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    // Merge spouses into family units.
    let mut unit_sets: UnionFind<usize> = UnionFind::new(row.len());
    for (i, &id) in row.iter().enumerate() {
        for spouse in graph.spouses(id) {
            if let Some(&j) = index.get(&spouse) {
                unit_sets.union(i, j);
            }
        }
    }

    let mut units: Vec<Vec<usize>> = Vec::new();
    let mut unit_of_root: HashMap<usize, usize> = HashMap::new();
    for i in 0..row.len() {
        let root = unit_sets.find(i);
        let slot = *unit_of_root.entry(root).or_insert_with(|| {
            units.push(Vec::new());
            units.len() - 1
        });
        units[slot].push(i);
    }

    // Merge sibling-linked units into groups.
    let mut group_sets: UnionFind<usize> = UnionFind::new(units.len());
    let unit_of_member: HashMap<usize, usize> = units
        .iter()
        .enumerate()
        .flat_map(|(u, members)| members.iter().map(move |&m| (m, u)))
        .collect();
    for (i, &id) in row.iter().enumerate() {
        for sibling in graph.siblings(id) {
            if let Some(&j) = index.get(&sibling) {
                group_sets.union(unit_of_member[&i], unit_of_member[&j]);
            }
        }
    }

    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    for unit in 0..units.len() {
        let root = group_sets.find(unit);
        let slot = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(unit);
    }

    let mut entries = Vec::with_capacity(row.len());
    for group in &groups {
        for (unit_pos, &unit) in group.iter().enumerate() {
            for (member_pos, &member) in units[unit].iter().enumerate() {
                let gap_before = if entries.is_empty() {
                    None
                } else if member_pos > 0 {
                    Some(RowGap::Spouse)
                } else if unit_pos > 0 {
                    Some(RowGap::Sibling)
                } else {
                    Some(RowGap::Unit)
                };
                entries.push(RowEntry {
                    id: row[member],
                    gap_before,
                });
            }
        }
    }

    entries
}
