//! Shared test helpers for index tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use summons_index::{
    ArtService, IndexError, IndexResult, MemoryPack, PackSource, ProgressDisplay,
};
use summons_model::RawEntry;
use summons_types::Notifier;

/// Builds a raw entry from a JSON object literal.
pub fn entry(value: Value) -> RawEntry {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A pf2e creature index entry.
pub fn creature(uuid: &str, name: &str, level: i64, alignment: &str) -> RawEntry {
    entry(json!({
        "_id": uuid.rsplit('.').next().unwrap_or(uuid),
        "uuid": uuid,
        "name": name,
        "img": format!("{name}.webp"),
        "type": "npc",
        "system": {
            "details": {
                "level": { "value": level },
                "alignment": { "value": alignment },
            },
            "traits": { "value": ["beast"] },
        },
    }))
}

/// A pack that counts `get_index` calls.
pub struct CountingPack {
    inner: MemoryPack,
    fetches: AtomicUsize,
    last_fields: Mutex<Vec<String>>,
}

impl CountingPack {
    pub fn new(id: &str, label: &str, entries: Vec<RawEntry>) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryPack::new(id, label, entries),
            fetches: AtomicUsize::new(0),
            last_fields: Mutex::new(Vec::new()),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn last_fields(&self) -> Vec<String> {
        self.last_fields.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackSource for CountingPack {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn label(&self) -> &str {
        self.inner.label()
    }

    async fn get_index(&self, fields: &[String]) -> IndexResult<Vec<RawEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        *self.last_fields.lock().unwrap() = fields.to_vec();
        self.inner.get_index(fields).await
    }
}

/// A pack whose index can never be read.
pub struct BrokenPack {
    pub id: String,
}

#[async_trait]
impl PackSource for BrokenPack {
    fn id(&self) -> &str {
        &self.id
    }

    async fn get_index(&self, _fields: &[String]) -> IndexResult<Vec<RawEntry>> {
        Err(IndexError::Source {
            pack: self.id.clone(),
            message: "index unavailable".to_string(),
        })
    }
}

/// Notifier that keeps every message.
#[derive(Default)]
pub struct RecordingNotifier {
    pub infos: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Progress display that keeps every update.
#[derive(Default)]
pub struct RecordingProgress {
    pub updates: Mutex<Vec<(String, u8)>>,
}

impl RecordingProgress {
    pub fn updates(&self) -> Vec<(String, u8)> {
        self.updates.lock().unwrap().clone()
    }
}

impl ProgressDisplay for RecordingProgress {
    fn display(&self, label: &str, pct: u8) {
        self.updates.lock().unwrap().push((label.to_string(), pct));
    }
}

/// Art service whose refresh always fails.
pub struct FailingArt;

#[async_trait]
impl ArtService for FailingArt {
    async fn refresh(&self) -> IndexResult<()> {
        Err(IndexError::Source {
            pack: "art".to_string(),
            message: "art registry offline".to_string(),
        })
    }

    fn image_for(&self, _uuid: &str) -> Option<String> {
        None
    }
}

/// Art service that counts refreshes.
#[derive(Default)]
pub struct CountingArt {
    pub refreshes: AtomicUsize,
}

#[async_trait]
impl ArtService for CountingArt {
    async fn refresh(&self) -> IndexResult<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn image_for(&self, uuid: &str) -> Option<String> {
        uuid.ends_with("wolf").then(|| "art/wolf-token.webp".to_string())
    }
}

