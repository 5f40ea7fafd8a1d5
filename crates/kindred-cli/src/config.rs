//! Configuration file loading for the Kindred CLI.
//!
//! An optional TOML file with a `[layout]` section overrides the engine's
//! layout defaults; every field is optional.

use std::fs;

use serde::Deserialize;

use kindred::config::LayoutConfig;

use crate::error::CliError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Loads the configuration file, or the defaults when no path is given.
pub fn load_config(path: Option<&String>) -> Result<AppConfig, CliError> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let contents = fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| CliError::Config {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_falls_back_to_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(
            config.layout().node_width(),
            LayoutConfig::default().node_width()
        );
    }
}
