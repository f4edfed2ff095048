//! TOML configuration for the `freight` tool.
//!
//! ```toml
//! [mapper]
//! threshold = 60
//!
//! [mapper.synonyms]
//! carrier = ["haulier"]
//!
//! [report]
//! page_size = 25
//!
//! [import]
//! duplicate_key = ["workOrderNo"]
//! duplicate_policy = "skip"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use freight_ingest::ImportConfig;
use freight_map::MapperConfig;
use freight_report::ReportDefaults;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// File picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "freight.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreightConfig {
    pub mapper: MapperConfig,
    pub report: ReportDefaults,
    pub import: ImportConfig,
}

impl FreightConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("parse freight configuration")
    }

    /// Reads an explicit config file. The file must exist and parse.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `explicit` if given, else `freight.toml` from `dir` when it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::from_path(&candidate);
        }
        debug!("no configuration file, using defaults");
        Ok(Self::default())
    }
}
