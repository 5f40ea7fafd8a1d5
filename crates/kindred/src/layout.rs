//! Family tree layout.
//!
//! Turns a [`Resolution`] and a [`GenerationMap`] into a collision-free 2D
//! position for every placed member:
//!
//! 1. Vertical placement: `y = generation * generation_gap`, ancestors above
//!    descendants.
//! 2. Branch split: disconnected branches are laid out side by side,
//!    separated by at least the configured branch gap.
//! 3. Row grouping: each generation row is ordered into family units
//!    (spouses) and sibling groups.
//! 4. Horizontal placement: rows are distributed left to right, then every
//!    member with placed children is re-centered onto the mean of its
//!    children's positions, deepest generation first.
//! 5. Collision pass: members of a generation are swept apart to at least
//!    node width plus clearance, preserving relative order.
//! 6. Global centering: the whole tree is shifted so the midpoint of its
//!    horizontal extent lands on x = 0.
//!
//! The computation is a pure function of its inputs; members absent from the
//! generation map are left unplaced.

mod positioning;
mod unit;

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use log::debug;

use kindred_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    config::LayoutConfig,
    generation::GenerationMap,
    graph::FamilyGraph,
    resolve::Resolution,
};

use unit::{RowGap, arrange_row};

/// The family tree layout engine.
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the engine's configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Computes a position for every member present in `generations`.
    pub fn compute(
        &self,
        resolution: &Resolution,
        generations: &GenerationMap,
    ) -> HashMap<Id, Point> {
        let placed: Vec<Id> = resolution
            .members()
            .filter(|&id| generations.contains(id))
            .collect();
        if placed.is_empty() {
            return HashMap::new();
        }

        let graph = FamilyGraph::from_resolution(resolution);
        let branches = graph.branches(&placed);
        debug!(
            members = placed.len(),
            branches = branches.len();
            "Computing layout"
        );

        // Lay branches out left to right, keeping at least the branch gap
        // between their bounding boxes.
        let mut xs: HashMap<Id, f32> = HashMap::with_capacity(placed.len());
        let mut previous_max: Option<f32> = None;
        for branch in &branches {
            let local = self.layout_branch(branch, &graph, generations);
            let Some((min_x, max_x)) = positioning::extent(local.values().copied()) else {
                continue;
            };

            let shift = match previous_max {
                None => 0.0,
                Some(max) => max + self.config.node_width() + self.config.branch_gap() - min_x,
            };
            for (id, x) in local {
                xs.insert(id, x + shift);
            }
            previous_max = Some(max_x + shift);
        }

        let mut positions: HashMap<Id, Point> = xs
            .into_iter()
            .filter_map(|(id, x)| {
                let generation = generations.get(id)?;
                let y = generation as f32 * self.config.generation_gap();
                Some((id, Point::new(x, y)))
            })
            .collect();

        // Center the tree on x = 0.
        if let Some((min_x, max_x)) = positioning::extent(positions.values().map(|p| p.x())) {
            let midpoint = (min_x + max_x) / 2.0;
            for point in positions.values_mut() {
                *point = point.shift_x(-midpoint);
            }
        }

        positions
    }

    /// Returns the bounding box of the node drawn at `position`.
    ///
    /// The box uses the configured node width and height, centered on the
    /// position, matching the geometry the collision and branch passes
    /// guarantee.
    pub fn node_bounds(&self, position: Point) -> Bounds {
        position.node_bounds(Size::new(self.config.node_width(), self.config.node_height()))
    }

    /// Lays out one branch in branch-local coordinates, returning x per member.
    fn layout_branch(
        &self,
        branch: &[Id],
        graph: &FamilyGraph,
        generations: &GenerationMap,
    ) -> HashMap<Id, f32> {
        let mut rows: BTreeMap<i32, Vec<Id>> = BTreeMap::new();
        for &id in branch {
            if let Some(generation) = generations.get(id) {
                rows.entry(generation).or_default().push(id);
            }
        }

        // Initial distribution: every row left to right with unit-aware gaps.
        let mut xs: HashMap<Id, f32> = HashMap::with_capacity(branch.len());
        let mut ordered_rows: BTreeMap<i32, Vec<Id>> = BTreeMap::new();
        for (&generation, row) in &rows {
            let entries = arrange_row(row, graph);
            let mut cursor = 0.0_f32;
            let mut order = Vec::with_capacity(entries.len());
            for entry in &entries {
                if let Some(gap) = entry.gap_before {
                    cursor += self.config.node_width() + self.row_gap(gap);
                }
                xs.insert(entry.id, cursor);
                order.push(entry.id);
            }
            ordered_rows.insert(generation, order);
        }

        // Center ancestors over their children, deepest generation first, so
        // a parent's centroid is always computed over final child positions.
        let generations_desc: Vec<i32> = ordered_rows.keys().rev().copied().collect();
        for &generation in generations_desc.iter().skip(1) {
            let Some(row) = ordered_rows.get(&generation) else {
                continue;
            };
            for &id in row {
                let child_xs: Vec<f32> = graph
                    .children(id)
                    .into_iter()
                    .filter_map(|child| xs.get(&child).copied())
                    .collect();
                if let Some(center) = positioning::centroid(&child_xs) {
                    xs.insert(id, center);
                }
            }
            self.resolve_row_collisions(row, &mut xs);
        }

        xs
    }

    /// Enforces the minimum separation within one generation row.
    fn resolve_row_collisions(&self, row: &[Id], xs: &mut HashMap<Id, f32>) {
        let mut placed: Vec<(Id, f32)> = row
            .iter()
            .filter_map(|&id| xs.get(&id).map(|&x| (id, x)))
            .collect();
        // Stable sort: ties keep the row order established by the grouping.
        placed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let mut positions: Vec<f32> = placed.iter().map(|&(_, x)| x).collect();
        positioning::sweep_apart(
            &mut positions,
            self.config.node_width() + self.config.min_clearance(),
        );

        for ((id, _), x) in placed.into_iter().zip(positions) {
            xs.insert(id, x);
        }
    }

    fn row_gap(&self, gap: RowGap) -> f32 {
        match gap {
            RowGap::Spouse => self.config.spouse_gap(),
            RowGap::Sibling => self.config.sibling_gap(),
            RowGap::Unit => self.config.family_unit_gap(),
        }
    }
}

/// Computes a layout with the given configuration.
///
/// Convenience wrapper over [`LayoutEngine::compute`].
pub fn compute_layout(
    resolution: &Resolution,
    generations: &GenerationMap,
    config: &LayoutConfig,
) -> HashMap<Id, Point> {
    LayoutEngine::new(config.clone()).compute(resolution, generations)
}
