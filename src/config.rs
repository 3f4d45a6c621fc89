//! Board configuration.
//!
//! Loaded from a TOML file; a missing file yields defaults.
//!
//! ```toml
//! [ingest]
//! duplicate_ids = "reject"
//! drop_blank_time_slots = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a fetched record set with repeated ids is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Refuse the whole record set; the store keeps its last-good state.
    #[default]
    Reject,
    /// Keep the first record per id and drop later repeats.
    KeepFirst,
}

impl DuplicateIdPolicy {
    /// Name as written in the config file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::KeepFirst => "keep_first",
        }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BoardConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
}

/// How fetched rows are turned into the stored record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IngestConfig {
    /// Handling of repeated ids within one fetch.
    #[serde(default)]
    pub duplicate_ids: DuplicateIdPolicy,
    /// Exclude records whose time slot is blank.
    #[serde(default)]
    pub drop_blank_time_slots: bool,
}

impl BoardConfig {
    /// Parses a TOML document; absent tables take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

/// Reads the config file at `path`, or defaults if it does not exist.
pub fn load_config(path: impl AsRef<Path>) -> Result<BoardConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(BoardConfig::default());
    }

    let raw = fs::read_to_string(path)?;
    BoardConfig::from_toml_str(&raw)
}
