//! Pack files on disk.
//!
//! A pack directory holds one `*.json` file per pack:
//!
//! ```json
//! { "id": "pf2e.bestiary", "label": "Bestiary", "entries": [ { "uuid": "...", "name": "..." } ] }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use summons_index::{
    IndexError, IndexResult, PackCatalog, PackDescriptor, PackSource, StaticArt, project_entry,
};
use summons_model::RawEntry;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct PackHeader {
    id: String,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackFile {
    #[serde(default)]
    entries: Vec<Value>,
}

/// One pack file. The entries are read from disk on every `get_index`.
#[derive(Debug, Clone)]
pub struct JsonPackSource {
    id: String,
    label: String,
    path: PathBuf,
}

impl JsonPackSource {
    /// Reads the pack header (`id`, `label`) from `path`.
    pub fn open(path: &Path) -> IndexResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let header: PackHeader = serde_json::from_str(&contents)?;
        if header.id.trim().is_empty() {
            return Err(IndexError::Config(format!("pack file {path:?} has an empty id")));
        }
        Ok(Self {
            label: header.label.unwrap_or_else(|| header.id.clone()),
            id: header.id,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PackSource for JsonPackSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    async fn get_index(&self, fields: &[String]) -> IndexResult<Vec<RawEntry>> {
        let source_error = |message: String| IndexError::Source {
            pack: self.id.clone(),
            message,
        };
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| source_error(e.to_string()))?;
        let file: PackFile =
            serde_json::from_str(&contents).map_err(|e| source_error(e.to_string()))?;

        Ok(file
            .entries
            .iter()
            .filter_map(Value::as_object)
            .map(|entry| project_entry(entry, fields))
            .collect())
    }
}

/// Every pack file of a directory, keyed by pack id.
#[derive(Clone, Default)]
pub struct DirectoryCatalog {
    packs: Vec<Arc<JsonPackSource>>,
}

impl DirectoryCatalog {
    /// Scans `dir` for `*.json` pack files, in file name order.
    /// Unreadable files are logged and skipped; the first file wins a duplicate id.
    pub fn scan(dir: &Path) -> IndexResult<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut packs: Vec<Arc<JsonPackSource>> = Vec::new();
        for path in paths {
            match JsonPackSource::open(&path) {
                Ok(pack) if packs.iter().any(|p| p.id == pack.id) => {
                    warn!(pack = %pack.id, "Duplicate pack id in {:?}, skipping", path);
                }
                Ok(pack) => {
                    debug!(pack = %pack.id, "Found pack file {:?}", path);
                    packs.push(Arc::new(pack));
                }
                Err(e) => warn!("Skipping pack file {:?}: {}", path, e),
            }
        }
        Ok(Self { packs })
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Descriptors of every pack, in scan order.
    pub fn descriptors(&self) -> Vec<PackDescriptor> {
        self.packs
            .iter()
            .map(|p| PackDescriptor::new(p.id.clone()).with_label(p.label.clone()))
            .collect()
    }
}

impl PackCatalog for DirectoryCatalog {
    fn get(&self, id: &str) -> Option<Arc<dyn PackSource>> {
        self.packs
            .iter()
            .find(|p| p.id == id)
            .map(|p| Arc::clone(p) as Arc<dyn PackSource>)
    }
}

/// Loads a `uuid -> image` JSON map.
pub fn load_art(path: &Path) -> IndexResult<StaticArt> {
    let contents = std::fs::read_to_string(path)?;
    let images: HashMap<String, String> = serde_json::from_str(&contents)?;
    debug!(images = images.len(), "Loaded art map from {:?}", path);
    Ok(StaticArt::new(images))
}
