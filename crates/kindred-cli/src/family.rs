//! Family data file loading.
//!
//! The input is a TOML file with `[[members]]` and `[[relations]]` tables.
//! Relation rows in the file carry no identifier of their own; synthetic ids
//! are minted from the row index on load.

use std::fs;

use serde::Deserialize;

use kindred::identifier::Id;
use kindred::member::Member;
use kindred::relation::{RawRelation, RelationKind};

use crate::error::CliError;

/// One relation row as written in the family file.
#[derive(Debug, Clone, Deserialize)]
struct RelationRow {
    source: Id,
    target: Id,
    kind: RelationKind,
}

/// The parsed family data file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FamilyFile {
    #[serde(default)]
    members: Vec<Member>,

    #[serde(default)]
    relations: Vec<RelationRow>,
}

impl FamilyFile {
    /// Returns the member records.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Returns the relation rows with synthetic identifiers assigned.
    pub fn raw_relations(&self) -> Vec<RawRelation> {
        self.relations
            .iter()
            .enumerate()
            .map(|(idx, row)| RawRelation::new(Id::synthetic(idx), row.source, row.target, row.kind))
            .collect()
    }
}

/// Reads and parses a family data file.
pub fn load_family(path: &str) -> Result<FamilyFile, CliError> {
    let contents = fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| CliError::Family {
        path: path.to_string(),
        source,
    })
}
