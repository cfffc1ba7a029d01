//! Ruleset-specific post-processing of raw index entries.
//!
//! Runs after a pack's index is fetched and before entries are wrapped.
//! Rulesets without an enricher pass their entries through untouched.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use summons_model::RawEntry;
use summons_types::RulesetId;

use crate::art::ArtService;
use crate::error::{IndexError, IndexResult};

/// Alignment letters and the traits they stand for, in the order traits are appended.
const ALIGNMENT_TRAITS: [(char, &str); 5] = [
    ('L', "lawful"),
    ('N', "neutral"),
    ('C', "chaotic"),
    ('G', "good"),
    ('E', "evil"),
];

/// Post-processing for one ruleset.
#[async_trait]
pub trait RulesetEnricher: Send + Sync {
    /// The ruleset this enricher applies to.
    fn ruleset(&self) -> RulesetId;

    /// Transforms (and may filter) one pack's entries.
    async fn enrich(&self, entries: Vec<RawEntry>) -> IndexResult<Vec<RawEntry>>;
}

/// Pathfinder 2e: module art, creature-only filtering, alignment traits.
pub struct Pf2eEnricher {
    art: Arc<dyn ArtService>,
    placeholder: String,
}

impl Pf2eEnricher {
    pub fn new(art: Arc<dyn ArtService>, placeholder: impl Into<String>) -> Self {
        Self {
            art,
            placeholder: placeholder.into(),
        }
    }
}

#[async_trait]
impl RulesetEnricher for Pf2eEnricher {
    fn ruleset(&self) -> RulesetId {
        RulesetId::PF2E
    }

    async fn enrich(&self, entries: Vec<RawEntry>) -> IndexResult<Vec<RawEntry>> {
        refresh_art(self.art.as_ref(), &RulesetId::PF2E).await?;

        Ok(entries
            .into_iter()
            .filter(has_traits)
            .map(|mut entry| {
                apply_art(&mut entry, self.art.as_ref(), &self.placeholder);
                append_alignment_traits(&mut entry);
                entry
            })
            .collect())
    }
}

/// D&D 5e: module art only.
pub struct Dnd5eEnricher {
    art: Arc<dyn ArtService>,
    placeholder: String,
}

impl Dnd5eEnricher {
    pub fn new(art: Arc<dyn ArtService>, placeholder: impl Into<String>) -> Self {
        Self {
            art,
            placeholder: placeholder.into(),
        }
    }
}

#[async_trait]
impl RulesetEnricher for Dnd5eEnricher {
    fn ruleset(&self) -> RulesetId {
        RulesetId::DND5E
    }

    async fn enrich(&self, entries: Vec<RawEntry>) -> IndexResult<Vec<RawEntry>> {
        refresh_art(self.art.as_ref(), &RulesetId::DND5E).await?;

        Ok(entries
            .into_iter()
            .map(|mut entry| {
                apply_art(&mut entry, self.art.as_ref(), &self.placeholder);
                entry
            })
            .collect())
    }
}

/// Traits implied by a compact alignment code ("LG" → lawful, good).
/// Non-string input yields nothing.
pub fn alignment_traits(alignment: &Value) -> Vec<&'static str> {
    let Some(code) = alignment.as_str() else {
        return Vec::new();
    };
    ALIGNMENT_TRAITS
        .iter()
        .filter(|(letter, _)| code.contains(*letter))
        .map(|(_, t)| *t)
        .collect()
}

/// Replaces `img` with module art when available; an absent or empty image
/// becomes `placeholder`.
pub fn apply_art(entry: &mut RawEntry, art: &dyn ArtService, placeholder: &str) {
    let module_art = entry
        .get("uuid")
        .and_then(Value::as_str)
        .and_then(|uuid| art.image_for(uuid));
    if let Some(img) = module_art {
        entry.insert("img".to_string(), Value::String(img));
    }

    let missing = match entry.get("img") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    };
    if missing {
        entry.insert("img".to_string(), Value::String(placeholder.to_string()));
    }
}

async fn refresh_art(art: &dyn ArtService, ruleset: &RulesetId) -> IndexResult<()> {
    art.refresh().await.map_err(|e| IndexError::Enrichment {
        ruleset: ruleset.to_string(),
        message: e.to_string(),
    })
}

fn has_traits(entry: &RawEntry) -> bool {
    entry
        .get("system")
        .and_then(|system| system.get("traits"))
        .is_some_and(|traits| !traits.is_null())
}

fn append_alignment_traits(entry: &mut RawEntry) {
    let derived = entry
        .get("system")
        .and_then(|s| s.pointer("/details/alignment/value"))
        .map(alignment_traits)
        .unwrap_or_default();
    if derived.is_empty() {
        return;
    }

    let Some(traits) = entry
        .get_mut("system")
        .and_then(|s| s.get_mut("traits"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    let values = traits.entry("value").or_insert_with(|| json!([]));
    if let Value::Array(values) = values {
        values.extend(derived.into_iter().map(|t| Value::String(t.to_string())));
    }
}
