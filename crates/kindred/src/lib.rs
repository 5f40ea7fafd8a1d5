//! Kindred - genealogical graph resolution and family tree layout.
//!
//! Three stages, each a pure function of the one before it: raw relation
//! rows are resolved into per-member views, the views are assigned integer
//! generations relative to a root, and the generations are laid out as
//! collision-free 2D positions. All data flows strictly forward; nothing is
//! cached between passes.

pub mod config;
pub mod creation;
pub mod error;
pub mod generation;
pub mod graph;
pub mod layout;
pub mod resolve;

pub use kindred_core::{geometry, identifier, member, relation, warning};

pub use error::RelationError;

use std::collections::HashMap;

use log::{debug, info};

use kindred_core::{
    geometry::Point, identifier::Id, member::Member, relation::RawRelation, warning::Warning,
};

use config::LayoutConfig;
use generation::GenerationMap;
use resolve::Resolution;

/// Builder for running the resolution, generation, and layout pipeline.
///
/// Holds a [`LayoutConfig`] and exposes each stage separately, plus
/// [`build`](TreeBuilder::build) for the full pass. The builder carries no
/// state between invocations and can be reused across data snapshots.
///
/// # Examples
///
/// ```
/// use kindred::TreeBuilder;
/// use kindred::identifier::Id;
/// use kindred::member::{Date, Member};
/// use kindred::relation::{RawRelation, RelationKind};
///
/// let members = vec![
///     Member::new(Id::new("marie"), "Marie", "Curie")
///         .with_birth_date(Date::from_year(1867)),
///     Member::new(Id::new("irene"), "Irene", "Joliot-Curie")
///         .with_birth_date(Date::from_year(1897)),
/// ];
/// let relations = vec![RawRelation::new(
///     Id::new("r1"),
///     Id::new("marie"),
///     Id::new("irene"),
///     RelationKind::Parent,
/// )];
///
/// let tree = TreeBuilder::default().build(&members, &relations, Id::new("marie"));
/// assert_eq!(tree.generation(Id::new("marie")), Some(0));
/// assert_eq!(tree.generation(Id::new("irene")), Some(1));
/// ```
#[derive(Default)]
pub struct TreeBuilder {
    config: LayoutConfig,
}

impl TreeBuilder {
    /// Creates a builder with the given layout configuration.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Resolves raw relation rows into per-member views.
    ///
    /// See [`resolve::resolve_relations`].
    pub fn resolve(&self, members: &[Member], relations: &[RawRelation]) -> Resolution {
        resolve::resolve_relations(members, relations)
    }

    /// Assigns generations to every member reachable from `root`.
    ///
    /// See [`generation::assign_generations`].
    pub fn assign_generations(&self, resolution: &Resolution, root: Id) -> GenerationMap {
        generation::assign_generations(resolution, root)
    }

    /// Assigns a generation to every member, seeding disconnected branches
    /// with the configured years-per-generation heuristic.
    ///
    /// See [`generation::assign_generations_all`].
    pub fn assign_generations_all(
        &self,
        members: &[Member],
        resolution: &Resolution,
        root: Id,
    ) -> GenerationMap {
        generation::assign_generations_all(
            members,
            resolution,
            root,
            self.config.years_per_generation(),
        )
    }

    /// Computes positions for every member present in `generations`.
    ///
    /// See [`layout::compute_layout`].
    pub fn compute_layout(
        &self,
        resolution: &Resolution,
        generations: &GenerationMap,
    ) -> HashMap<Id, Point> {
        layout::compute_layout(resolution, generations, &self.config)
    }

    /// Runs the full pipeline: resolve, assign generations to every member,
    /// and lay the tree out.
    pub fn build(&self, members: &[Member], relations: &[RawRelation], root: Id) -> TreeLayout {
        info!(
            members = members.len(),
            relations = relations.len(),
            root = root.to_string();
            "Building family tree"
        );

        let resolution = self.resolve(members, relations);
        let generations = self.assign_generations_all(members, &resolution, root);
        let positions = self.compute_layout(&resolution, &generations);

        let mut warnings: Vec<Warning> = resolution.warnings().to_vec();
        warnings.extend(generations.warnings().iter().cloned());

        debug!(
            positioned = positions.len(),
            warnings = warnings.len();
            "Family tree built"
        );

        TreeLayout {
            positions,
            generations,
            warnings,
        }
    }
}

/// The result of a full pipeline pass.
#[derive(Debug, Default)]
pub struct TreeLayout {
    positions: HashMap<Id, Point>,
    generations: GenerationMap,
    warnings: Vec<Warning>,
}

impl TreeLayout {
    /// Returns the position of every placed member.
    pub fn positions(&self) -> &HashMap<Id, Point> {
        &self.positions
    }

    /// Returns the position of `member`, if placed.
    pub fn position(&self, member: Id) -> Option<Point> {
        self.positions.get(&member).copied()
    }

    /// Returns the generation assignment.
    pub fn generations(&self) -> &GenerationMap {
        &self.generations
    }

    /// Returns the generation of `member`, if assigned.
    pub fn generation(&self, member: Id) -> Option<i32> {
        self.generations.get(member)
    }

    /// Returns the data-quality warnings from all stages.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
