//! Error type for the Kindred CLI.

use std::io;

use thiserror::Error;

/// Everything that can go wrong between reading the input file and writing
/// the layout.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse family file {path}: {source}")]
    Family {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown root member: {0}")]
    UnknownRoot(String),

    #[error("family file contains no members")]
    EmptyFamily,

    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
}
