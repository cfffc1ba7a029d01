//! Localization of headers and notifications.
//!
//! Keys are written with the short `fs.` prefix in code
//! (`fs.menu.headers.name`) and looked up under the module namespace
//! (`hazard-foundry-summons.menu.headers.name`).

use std::collections::HashMap;

/// Namespace every short `fs.` key is expanded into.
pub const MODULE_NAMESPACE: &str = "hazard-foundry-summons";

/// The host's string table.
pub trait Localizer: Send + Sync {
    /// Looks up a fully-qualified key. Returns `None` when the table has no entry.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Localizes a key, expanding the short `fs.` prefix first.
    /// Unknown keys come back verbatim (expanded) so a missing translation
    /// is visible rather than blank.
    fn localize(&self, key: &str) -> String {
        let key = expand_key(key);
        self.lookup(&key).unwrap_or(key)
    }

    /// Localizes a key and substitutes `{name}` placeholders.
    fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut out = self.localize(key);
        for (name, value) in args {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

fn expand_key(key: &str) -> String {
    match key.strip_prefix("fs.") {
        Some(rest) => format!("{MODULE_NAMESPACE}.{rest}"),
        None => key.to_string(),
    }
}

/// Built-in English strings.
#[derive(Debug, Clone)]
pub struct EnglishLocalizer {
    table: HashMap<String, String>,
}

impl EnglishLocalizer {
    #[must_use]
    pub fn new() -> Self {
        let entries = [
            ("menu.headers.name", "Name"),
            ("menu.headers.cr", "CR"),
            ("menu.headers.level", "Level"),
            ("notifications.loadingPack", "Loading {pack}"),
            ("notifications.loadingComplete", "Loading complete"),
            ("notifications.error.loadingPack", "Could not load pack {pack}"),
            (
                "notifications.error.missingName",
                "Error loading pack index. An entry is missing a name!",
            ),
            (
                "notifications.error.missingUuid",
                "Error loading pack index. An entry is missing a uuid!",
            ),
            (
                "notifications.error.indexFailed",
                "Could not read the index of {pack}",
            ),
        ];
        let table = entries
            .into_iter()
            .map(|(k, v)| (format!("{MODULE_NAMESPACE}.{k}"), v.to_string()))
            .collect();
        Self { table }
    }

    /// Adds or replaces a fully-qualified entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.table.insert(key.into(), value.into());
    }
}

impl Default for EnglishLocalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer for EnglishLocalizer {
    fn lookup(&self, key: &str) -> Option<String> {
        self.table.get(key).cloned()
    }
}
