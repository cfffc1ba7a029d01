//! docType → wrapper class table.
//!
//! Built once during session startup (base class first, then whatever the
//! extensions register) and read-only afterwards.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::class::{BaseWrapper, DocumentResolver, WrapperClass};
use crate::error::{ModelError, ModelResult};
use crate::wrapper::{BASE_DOC_TYPE, DocWrapper, RawEntry, SerializedWrapper};

/// Anything a wrapper can be built from.
#[derive(Debug, Clone)]
pub enum WrapperInput {
    /// A raw index entry.
    Raw(RawEntry),
    /// A JSON document previously produced by [`DocWrapper::serialize`].
    Serialized(String),
    /// An existing wrapper; passed through unchanged.
    Wrapped(DocWrapper),
}

impl From<RawEntry> for WrapperInput {
    fn from(raw: RawEntry) -> Self {
        WrapperInput::Raw(raw)
    }
}

impl From<Value> for WrapperInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => WrapperInput::Raw(map),
            Value::String(s) => WrapperInput::Serialized(s),
            // Any other JSON value is not an entry; an empty record fails
            // validation with the usual missing-field error.
            _ => WrapperInput::Raw(RawEntry::new()),
        }
    }
}

impl From<String> for WrapperInput {
    fn from(document: String) -> Self {
        WrapperInput::Serialized(document)
    }
}

impl From<&str> for WrapperInput {
    fn from(document: &str) -> Self {
        WrapperInput::Serialized(document.to_string())
    }
}

impl From<DocWrapper> for WrapperInput {
    fn from(wrapper: DocWrapper) -> Self {
        WrapperInput::Wrapped(wrapper)
    }
}

/// Maps docType tags to wrapper classes.
#[derive(Clone)]
pub struct WrapperRegistry {
    classes: HashMap<String, Arc<dyn WrapperClass>>,
    base: Arc<dyn WrapperClass>,
}

impl WrapperRegistry {
    /// Creates a registry holding only [`BaseWrapper`].
    pub fn new() -> Self {
        let base: Arc<dyn WrapperClass> = Arc::new(BaseWrapper);
        let mut classes = HashMap::new();
        classes.insert(BASE_DOC_TYPE.to_string(), Arc::clone(&base));
        Self { classes, base }
    }

    /// Registers a class under its docType, replacing any previous one.
    pub fn register(&mut self, class: Arc<dyn WrapperClass>) {
        let doc_type = class.doc_type().to_string();
        debug!(doc_type = %doc_type, "Wrapper class registered");
        self.classes.insert(doc_type, class);
    }

    /// Returns true if `doc_type` has a registered class.
    pub fn contains(&self, doc_type: &str) -> bool {
        self.classes.contains_key(doc_type)
    }

    /// Registered docType tags, sorted.
    pub fn doc_types(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Looks up a class, falling back to the base class for unknown tags.
    pub fn resolve(&self, doc_type: &str) -> Arc<dyn WrapperClass> {
        self.classes
            .get(doc_type)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.base))
    }

    /// Wraps an entry, dispatching on its `docType` tag (base class when untagged).
    pub fn wrap(&self, input: impl Into<WrapperInput>) -> ModelResult<DocWrapper> {
        let raw = match into_raw(input.into())? {
            Ok(raw) => raw,
            Err(wrapper) => return Ok(wrapper),
        };
        let class = match raw.get("docType").and_then(Value::as_str) {
            Some(tag) => self.resolve(tag),
            None => Arc::clone(&self.base),
        };
        build(class.as_ref(), raw)
    }

    /// Wraps an entry with the class registered for `doc_type`.
    pub fn wrap_as(&self, doc_type: &str, input: impl Into<WrapperInput>) -> ModelResult<DocWrapper> {
        let raw = match into_raw(input.into())? {
            Ok(raw) => raw,
            Err(wrapper) => return Ok(wrapper),
        };
        build(self.resolve(doc_type).as_ref(), raw)
    }

    /// Serializes a wrapper to its `{docType, document}` form.
    pub fn serialize(&self, wrapper: &DocWrapper) -> ModelResult<SerializedWrapper> {
        wrapper.serialize()
    }

    /// Rebuilds a wrapper with the class named by `data.doc_type`.
    pub fn deserialize(&self, data: &SerializedWrapper) -> ModelResult<DocWrapper> {
        self.wrap_as(&data.doc_type, data.document.as_str())
    }

    /// Loads the full document behind a wrapper through its class.
    pub async fn load_document(
        &self,
        wrapper: &DocWrapper,
        resolver: &dyn DocumentResolver,
    ) -> ModelResult<Option<Value>> {
        self.resolve(wrapper.doc_type())
            .load_document(wrapper, resolver)
            .await
    }
}

impl Default for WrapperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WrapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperRegistry")
            .field("doc_types", &self.doc_types())
            .finish()
    }
}

/// `Ok(Ok(raw))` for something to wrap, `Ok(Err(wrapper))` for a pass-through.
fn into_raw(input: WrapperInput) -> ModelResult<Result<RawEntry, DocWrapper>> {
    match input {
        WrapperInput::Raw(raw) => Ok(Ok(raw)),
        WrapperInput::Wrapped(wrapper) => Ok(Err(wrapper)),
        WrapperInput::Serialized(document) => match serde_json::from_str(&document)? {
            Value::Object(raw) => Ok(Ok(raw)),
            _ => Err(ModelError::NotAnObject),
        },
    }
}

fn build(class: &dyn WrapperClass, raw: RawEntry) -> ModelResult<DocWrapper> {
    let mut wrapper = DocWrapper::from_raw(class.doc_type(), raw)?;
    class
        .validate(&wrapper)
        .map_err(|reason| ModelError::Rejected {
            doc_type: class.doc_type().to_string(),
            reason,
        })?;
    class.on_wrap(&mut wrapper);
    Ok(wrapper)
}
