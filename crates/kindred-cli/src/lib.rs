//! CLI logic for the Kindred family tree tool.
//!
//! Reads a TOML family data file, runs the resolution, generation, and
//! layout pipeline, and writes the computed positions as JSON for a renderer.

pub mod error;

mod args;
mod config;
mod family;

pub use args::Args;
pub use error::CliError;

use std::{collections::BTreeMap, fs};

use log::{info, warn};
use serde::Serialize;

use kindred::{TreeBuilder, TreeLayout, identifier::Id, member::Member};

/// The JSON document written for the renderer.
#[derive(Debug, Serialize)]
struct LayoutOutput {
    positions: BTreeMap<String, OutputPoint>,
    generations: BTreeMap<String, i32>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct OutputPoint {
    x: f32,
    y: f32,
}

impl LayoutOutput {
    fn from_tree(tree: &TreeLayout) -> Self {
        let positions = tree
            .positions()
            .iter()
            .map(|(id, point)| {
                (
                    id.to_string(),
                    OutputPoint {
                        x: point.x(),
                        y: point.y(),
                    },
                )
            })
            .collect();
        let generations = tree
            .generations()
            .iter()
            .map(|(id, generation)| (id.to_string(), generation))
            .collect();
        let warnings = tree.warnings().iter().map(ToString::to_string).collect();

        Self {
            positions,
            generations,
            warnings,
        }
    }
}

fn pick_root(members: &[Member], requested: Option<&String>) -> Result<Id, CliError> {
    match requested {
        Some(name) => {
            let root = Id::new(name);
            if members.iter().any(|m| m.id() == root) {
                Ok(root)
            } else {
                Err(CliError::UnknownRoot(name.clone()))
            }
        }
        None => members
            .first()
            .map(Member::id)
            .ok_or(CliError::EmptyFamily),
    }
}

/// Run the Kindred CLI application
///
/// Processes the family data file through the pipeline and writes the
/// resulting layout to the output file.
///
/// # Errors
///
/// Returns `CliError` for file I/O errors, configuration or family file
/// parse errors, an unknown root member, or an empty family file.
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing family data"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let family = family::load_family(&args.input)?;

    let members = family.members();
    let relations = family.raw_relations();
    let root = pick_root(members, args.root.as_ref())?;

    let builder = TreeBuilder::new(app_config.layout().clone());
    let tree = builder.build(members, &relations, root);

    for warning in tree.warnings() {
        warn!("{warning}");
    }

    let output = LayoutOutput::from_tree(&tree);
    let json = serde_json::to_string_pretty(&output)?;
    fs::write(&args.output, json)?;

    info!(
        positioned = tree.positions().len(),
        output_file = args.output;
        "Layout exported successfully"
    );

    Ok(())
}
