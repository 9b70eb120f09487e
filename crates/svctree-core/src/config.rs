//! Configuration for svctree
//!
//! Stored in $XDG_CONFIG_HOME/svctree/config.toml

use crate::id::{DEFAULT_CATEGORY_PREFIX, DEFAULT_SERVICE_PREFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "svctree";
const CONFIG_FILE: &str = "config.toml";

/// svctree configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start sessions from the built-in salon catalog
    pub seed: bool,

    /// Prefix for generated category IDs
    pub category_prefix: String,

    /// Prefix for generated service IDs
    pub service_prefix: String,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: true,
            category_prefix: DEFAULT_CATEGORY_PREFIX.to_string(),
            service_prefix: DEFAULT_SERVICE_PREFIX.to_string(),
            display: DisplayConfig::default(),
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use colors in output
    pub colors: bool,

    /// Print descriptions under names in the tree
    pub show_descriptions: bool,

    /// Spaces per tree level
    pub indent: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            show_descriptions: false,
            indent: 2,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> crate::Result<PathBuf> {
        let base = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .ok_or(crate::Error::NoConfigDir)?;

        Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load config from a TOML file, or defaults if it does not exist
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Write the commented default config to `path`, creating parent dirs
    pub fn write_default(path: &Path) -> crate::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, Self::default_with_comments())?;
        Ok(())
    }

    /// Generate a default config file with comments
    pub fn default_with_comments() -> String {
        r#"# svctree configuration

# Start sessions from the built-in salon catalog
seed = true

# Prefixes for generated IDs (e.g. "cat-4k2m9q0z")
category_prefix = "cat"
service_prefix = "svc"

[display]
# Use colors in output
colors = true

# Print descriptions under names in the tree
show_descriptions = false

# Spaces per tree level
indent = 2
"#
        .to_string()
    }
}
