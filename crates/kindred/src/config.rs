//! Layout configuration.
//!
//! [`LayoutConfig`] controls the geometry of the computed tree: node box
//! dimensions and the gaps between spouses, siblings, family units, branches,
//! and generations. All fields are optional when deserialized from an
//! external source and fall back to the defaults below.
//!
//! # Example
//!
//! ```
//! # use kindred::config::LayoutConfig;
//! let config = LayoutConfig::default();
//! assert!(config.branch_gap() > config.family_unit_gap());
//! ```

use serde::Deserialize;

fn default_node_width() -> f32 {
    120.0
}

fn default_node_height() -> f32 {
    60.0
}

fn default_spouse_gap() -> f32 {
    40.0
}

fn default_sibling_gap() -> f32 {
    60.0
}

fn default_generation_gap() -> f32 {
    150.0
}

fn default_family_unit_gap() -> f32 {
    100.0
}

fn default_branch_gap() -> f32 {
    200.0
}

fn default_years_per_generation() -> f32 {
    25.0
}

/// Geometry settings for the layout stage.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Width of a member's node box.
    #[serde(default = "default_node_width")]
    node_width: f32,

    /// Height of a member's node box.
    #[serde(default = "default_node_height")]
    node_height: f32,

    /// Gap between spouses within a family unit.
    #[serde(default = "default_spouse_gap")]
    spouse_gap: f32,

    /// Gap between adjacent sibling groups.
    #[serde(default = "default_sibling_gap")]
    sibling_gap: f32,

    /// Vertical distance between generations.
    #[serde(default = "default_generation_gap")]
    generation_gap: f32,

    /// Gap between unrelated family units in the same generation.
    #[serde(default = "default_family_unit_gap")]
    family_unit_gap: f32,

    /// Minimum gap between disconnected branches.
    #[serde(default = "default_branch_gap")]
    branch_gap: f32,

    /// Heuristic hint for estimating generations from birth years.
    ///
    /// Never a hard constraint; only consulted when seeding disconnected
    /// branches whose generation cannot be derived from relations.
    #[serde(default = "default_years_per_generation")]
    years_per_generation: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: default_node_width(),
            node_height: default_node_height(),
            spouse_gap: default_spouse_gap(),
            sibling_gap: default_sibling_gap(),
            generation_gap: default_generation_gap(),
            family_unit_gap: default_family_unit_gap(),
            branch_gap: default_branch_gap(),
            years_per_generation: default_years_per_generation(),
        }
    }
}

impl LayoutConfig {
    /// Creates a configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node box width.
    pub fn with_node_width(mut self, width: f32) -> Self {
        self.node_width = width;
        self
    }

    /// Sets the node box height.
    pub fn with_node_height(mut self, height: f32) -> Self {
        self.node_height = height;
        self
    }

    /// Sets the gap between spouses.
    pub fn with_spouse_gap(mut self, gap: f32) -> Self {
        self.spouse_gap = gap;
        self
    }

    /// Sets the gap between sibling groups.
    pub fn with_sibling_gap(mut self, gap: f32) -> Self {
        self.sibling_gap = gap;
        self
    }

    /// Sets the vertical distance between generations.
    pub fn with_generation_gap(mut self, gap: f32) -> Self {
        self.generation_gap = gap;
        self
    }

    /// Sets the gap between unrelated family units.
    pub fn with_family_unit_gap(mut self, gap: f32) -> Self {
        self.family_unit_gap = gap;
        self
    }

    /// Sets the minimum gap between disconnected branches.
    pub fn with_branch_gap(mut self, gap: f32) -> Self {
        self.branch_gap = gap;
        self
    }

    /// Sets the years-per-generation heuristic hint.
    pub fn with_years_per_generation(mut self, years: f32) -> Self {
        self.years_per_generation = years;
        self
    }

    /// Returns the node box width.
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    /// Returns the node box height.
    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the gap between spouses.
    pub fn spouse_gap(&self) -> f32 {
        self.spouse_gap
    }

    /// Returns the gap between sibling groups.
    pub fn sibling_gap(&self) -> f32 {
        self.sibling_gap
    }

    /// Returns the vertical distance between generations.
    pub fn generation_gap(&self) -> f32 {
        self.generation_gap
    }

    /// Returns the gap between unrelated family units.
    pub fn family_unit_gap(&self) -> f32 {
        self.family_unit_gap
    }

    /// Returns the minimum gap between disconnected branches.
    pub fn branch_gap(&self) -> f32 {
        self.branch_gap
    }

    /// Returns the years-per-generation heuristic hint.
    pub fn years_per_generation(&self) -> f32 {
        self.years_per_generation
    }

    /// Returns the minimum clearance between node boxes in one generation.
    ///
    /// The collision pass never lets two boxes sit closer than this; it is
    /// the spouse gap, the smallest configured separation.
    pub fn min_clearance(&self) -> f32 {
        self.spouse_gap
    }
}
