use async_trait::async_trait;
use serde_json::Value;

use crate::error::ModelResult;
use crate::wrapper::{BASE_DOC_TYPE, DocWrapper};

/// The host's document lookup (`fromUuid`): turns a lightweight index entry
/// into the full underlying document.
#[async_trait]
pub trait DocumentResolver: Send + Sync {
    /// Returns `Ok(None)` when nothing exists under `uuid`.
    async fn resolve(&self, uuid: &str) -> ModelResult<Option<Value>>;
}

/// Behavior attached to a docType.
///
/// Most entries never need more than [`BaseWrapper`]. Third parties
/// register a class when their index entries need:
/// - Extra validation beyond "has a name and a uuid"
/// - Post-wrap fixups (derived fields, normalized paths)
/// - A different way to load the full document
#[async_trait]
pub trait WrapperClass: Send + Sync {
    /// The docType tag this class answers to.
    fn doc_type(&self) -> &str;

    /// Validate a wrapper after the required fields were checked.
    /// Return `Err(reason)` to reject the entry.
    fn validate(&self, wrapper: &DocWrapper) -> Result<(), String> {
        let _ = wrapper;
        Ok(())
    }

    /// Called once after a wrapper passes validation.
    fn on_wrap(&self, wrapper: &mut DocWrapper) {
        let _ = wrapper;
    }

    /// Loads the full document behind the entry.
    async fn load_document(
        &self,
        wrapper: &DocWrapper,
        resolver: &dyn DocumentResolver,
    ) -> ModelResult<Option<Value>> {
        resolver.resolve(wrapper.uuid()).await
    }
}

/// The default class, used for untagged entries and unknown tags.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaseWrapper;

#[async_trait]
impl WrapperClass for BaseWrapper {
    fn doc_type(&self) -> &str {
        BASE_DOC_TYPE
    }
}
