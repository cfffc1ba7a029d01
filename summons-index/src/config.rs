//! Module settings: which packs to index and which fields to request.
//!
//! Read from `summons.toml`:
//!
//! ```toml
//! debug = false
//! additional_index_fields = ["system.traits.rarity"]
//!
//! [[sources]]
//! id = "pf2e.pathfinder-bestiary"
//! label = "Pathfinder Bestiary"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{IndexError, IndexResult};
use crate::source::PackDescriptor;

/// Image used when an entry has neither module art nor its own image.
pub const DEFAULT_PLACEHOLDER_ICON: &str = "icons/svg/mystery-man.svg";

/// Module configuration, consumed read-only by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummonsConfig {
    /// Packs to index, in order.
    pub sources: Vec<PackDescriptor>,
    /// Base index field list (dotted paths).
    pub index_fields: Vec<String>,
    /// Extra fields, typically ruleset-specific.
    pub additional_index_fields: Vec<String>,
    /// Verbose logging.
    pub debug: bool,
    /// Fallback token image.
    pub placeholder_icon: String,
}

fn default_index_fields() -> Vec<String> {
    [
        "img",
        "system.details.alignment.value",
        "system.details.cr",
        "system.details.level.value",
        "system.traits.value",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for SummonsConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            index_fields: default_index_fields(),
            additional_index_fields: Vec::new(),
            debug: false,
            placeholder_icon: DEFAULT_PLACEHOLDER_ICON.to_string(),
        }
    }
}

impl SummonsConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> IndexResult<Self> {
        let config: SummonsConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file.
    /// Falls back to defaults when the file is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No config file found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!(sources = config.sources.len(), "Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!(
                        "Failed to parse config file {:?}: {}. Falling back to defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read config file {:?}: {}. Falling back to defaults.",
                    path, e
                );
                Self::default()
            }
        }
    }

    /// Rejects sources without an id.
    pub fn validate(&self) -> IndexResult<()> {
        if let Some(pos) = self.sources.iter().position(|s| s.id.trim().is_empty()) {
            return Err(IndexError::Config(format!("source #{} has an empty id", pos + 1)));
        }
        Ok(())
    }

    /// Base fields followed by additional fields, duplicates removed.
    pub fn requested_fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = Vec::new();
        for field in self.index_fields.iter().chain(&self.additional_index_fields) {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }
        fields
    }
}
