use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};

/// A raw index entry as delivered by a pack source.
pub type RawEntry = Map<String, Value>;

/// docType of the base wrapper class.
pub const BASE_DOC_TYPE: &str = "DocWrapper";

const DOC_TYPE: &str = "docType";
const UUID: &str = "uuid";
const NAME: &str = "name";
const ID: &str = "id";
const VALID: &str = "valid";

/// A validated index entry.
///
/// `uuid` and `name` are guaranteed non-empty. The identity fields are
/// normalized to strings and kept in `fields` next to everything else from
/// the raw entry, so system-specific data (`system.traits`,
/// `system.details.cr`, ...) and identity alike are reachable through
/// [`DocWrapper::pointer`].
#[derive(Debug, Clone, PartialEq)]
pub struct DocWrapper {
    fields: RawEntry,
}

impl DocWrapper {
    /// Builds a wrapper from a raw entry.
    ///
    /// A `docType` on the entry wins over `default_doc_type`. An absent or
    /// null `id` falls back to `uuid`; an `id` that is neither a string nor
    /// a number is rejected. Any incoming `valid` flag is discarded.
    pub(crate) fn from_raw(default_doc_type: &str, mut raw: RawEntry) -> ModelResult<Self> {
        let doc_type = raw
            .remove(DOC_TYPE)
            .and_then(|v| text(&v))
            .unwrap_or_else(|| default_doc_type.to_string());
        let uuid = raw.remove(UUID).and_then(|v| text(&v));
        let name = raw.remove(NAME).and_then(|v| text(&v));
        raw.remove(VALID);

        let (uuid, name) = match (uuid, name) {
            (Some(uuid), Some(name)) => (uuid, name),
            (uuid, name) => {
                let mut missing = Vec::new();
                if name.is_none() {
                    missing.push(NAME);
                }
                if uuid.is_none() {
                    missing.push(UUID);
                }
                return Err(ModelError::MissingFields(missing));
            }
        };

        let id = match raw.remove(ID) {
            None | Some(Value::Null) => uuid.clone(),
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(ModelError::InvalidField {
                    field: ID,
                    reason: format!("expected a string or number, got {other}"),
                });
            }
        };

        raw.insert(DOC_TYPE.into(), Value::String(doc_type));
        raw.insert(UUID.into(), Value::String(uuid));
        raw.insert(NAME.into(), Value::String(name));
        raw.insert(ID.into(), Value::String(id));
        Ok(Self { fields: raw })
    }

    pub fn doc_type(&self) -> &str {
        self.identity(DOC_TYPE)
    }

    pub fn uuid(&self) -> &str {
        self.identity(UUID)
    }

    pub fn name(&self) -> &str {
        self.identity(NAME)
    }

    pub fn id(&self) -> &str {
        self.identity(ID)
    }

    /// Always true: an invalid entry never becomes a `DocWrapper`.
    pub fn is_valid(&self) -> bool {
        true
    }

    /// Every field of the entry, identity included. `valid` is not stored.
    pub fn fields(&self) -> &RawEntry {
        &self.fields
    }

    /// Identity fields are always present as strings after construction.
    fn identity(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Sets (or replaces) a non-identity field.
    /// Identity fields are fixed at construction and are ignored here.
    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if matches!(key.as_str(), DOC_TYPE | UUID | NAME | ID | VALID) {
            return;
        }
        self.fields.insert(key, value);
    }

    /// Resolves a JSON pointer (e.g. "/system/details/cr" or "/name")
    /// against the entry's fields. Missing segments yield `None`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        match rest.split_once('/') {
            None => self.fields.get(rest),
            Some((head, tail)) => self.fields.get(head)?.pointer(&format!("/{tail}")),
        }
    }

    /// Extract a string value using a JSON pointer.
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(Value::as_str)
    }

    /// Extract a numeric value using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(Value::as_f64)
    }

    /// Token image path, if any.
    pub fn img(&self) -> Option<&str> {
        self.get_str("/img")
    }

    /// Trait tags under `system.traits.value`. Non-string members are skipped.
    pub fn traits(&self) -> Vec<&str> {
        self.pointer("/system/traits/value")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Full JSON form, identity fields included, `valid: true`.
    pub fn to_value(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert(VALID.into(), Value::Bool(true));
        Value::Object(map)
    }

    /// Transfer form: the docType plus the full JSON document as a string.
    pub fn serialize(&self) -> ModelResult<SerializedWrapper> {
        Ok(SerializedWrapper {
            doc_type: self.doc_type().to_string(),
            document: serde_json::to_string(&self.to_value())?,
        })
    }
}

/// Persisted/transferred form of a wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedWrapper {
    pub doc_type: String,
    pub document: String,
}

/// Non-empty string, or a number rendered as text. Anything else counts as absent.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
