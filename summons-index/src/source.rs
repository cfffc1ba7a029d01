//! Pack sources and their lookup.
//!
//! A pack source is anything that can hand out a (field-restricted) index
//! of raw entries. The host's compendium collection is reached through a
//! [`PackCatalog`]; third parties add their own sources to [`CustomPacks`],
//! which shadow catalog packs with the same id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;
use summons_model::RawEntry;

use crate::error::IndexResult;

/// Fields every host index carries regardless of the requested list.
pub const ALWAYS_INDEXED: &[&str] = &["_id", "uuid", "name", "img", "type", "docType"];

/// A configured pack reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDescriptor {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PackDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            title: None,
            name: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Best human-readable reference for diagnostics: id, then label, title, name.
    pub fn display_name(&self) -> &str {
        [Some(&self.id), self.label.as_ref(), self.title.as_ref(), self.name.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("<unnamed pack>")
    }
}

/// A queryable collection of entries (a compendium).
#[async_trait]
pub trait PackSource: Send + Sync {
    /// Stable identifier, used for deduplication and lookup.
    fn id(&self) -> &str;

    /// Human-readable name shown in progress messages.
    fn label(&self) -> &str {
        self.id()
    }

    /// Returns the index restricted to `fields` (dotted paths) plus
    /// [`ALWAYS_INDEXED`].
    async fn get_index(&self, fields: &[String]) -> IndexResult<Vec<RawEntry>>;
}

/// The host's pack collection.
pub trait PackCatalog: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<dyn PackSource>>;
}

/// In-memory catalog.
#[derive(Default, Clone)]
pub struct MemoryCatalog {
    packs: HashMap<String, Arc<dyn PackSource>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pack: Arc<dyn PackSource>) {
        self.packs.insert(pack.id().to_string(), pack);
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

impl PackCatalog for MemoryCatalog {
    fn get(&self, id: &str) -> Option<Arc<dyn PackSource>> {
        self.packs.get(id).cloned()
    }
}

/// A pack whose entries are held in memory.
#[derive(Debug, Clone)]
pub struct MemoryPack {
    id: String,
    label: String,
    entries: Vec<RawEntry>,
}

impl MemoryPack {
    pub fn new(id: impl Into<String>, label: impl Into<String>, entries: Vec<RawEntry>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            entries,
        }
    }

    /// Builds a pack from JSON values; non-object values are dropped.
    pub fn from_values(id: impl Into<String>, label: impl Into<String>, values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        Self::new(id, label, entries)
    }
}

#[async_trait]
impl PackSource for MemoryPack {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    async fn get_index(&self, fields: &[String]) -> IndexResult<Vec<RawEntry>> {
        Ok(self.entries.iter().map(|e| project_entry(e, fields)).collect())
    }
}

/// Sources registered by extensions, in registration order.
#[derive(Default, Clone)]
pub struct CustomPacks {
    packs: Vec<Arc<dyn PackSource>>,
}

impl CustomPacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source. A source with the same id is replaced in place.
    pub fn register(&mut self, pack: Arc<dyn PackSource>) {
        match self.packs.iter().position(|p| p.id() == pack.id()) {
            Some(pos) => self.packs[pos] = pack,
            None => self.packs.push(pack),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn PackSource>> {
        self.packs.iter().find(|p| p.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Descriptors of every custom source, for listing them as selectable packs.
    pub fn descriptors(&self) -> Vec<PackDescriptor> {
        self.packs
            .iter()
            .map(|p| PackDescriptor::new(p.id()).with_label(p.label()))
            .collect()
    }
}

/// Removes items whose key was already seen, keeping first occurrences in order.
pub fn deduplicate<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Restricts an entry to [`ALWAYS_INDEXED`] plus the given dotted paths,
/// keeping nesting (`system.details.cr` stays under `system.details`).
pub fn project_entry(entry: &RawEntry, fields: &[String]) -> RawEntry {
    let mut out = Map::new();
    for key in ALWAYS_INDEXED {
        if let Some(value) = entry.get(*key) {
            out.insert((*key).to_string(), value.clone());
        }
    }
    for field in fields {
        let path: Vec<&str> = field.split('.').collect();
        if let Some(value) = lookup(entry, &path) {
            insert_path(&mut out, &path, value.clone());
        }
    }
    out
}

fn lookup<'a>(entry: &'a RawEntry, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    rest.iter()
        .try_fold(entry.get(*first)?, |value, key| value.get(*key))
}

fn insert_path(out: &mut RawEntry, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut node = out;
    for key in parents {
        let child = node
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        let Value::Object(map) = child else {
            return;
        };
        node = map;
    }
    node.insert((*last).to_string(), value);
}
