use summons_columns::ColumnRegistryBuilder;
use summons_model::{DocWrapper, WrapperRegistry};

use crate::source::CustomPacks;

/// Third-party hooks into the summons lifecycle.
///
/// The `register_*` methods run once, in registration order, while the
/// session is being built and before it serves any request.
/// `on_loading_packs` runs at the end of every index load that actually
/// reads sources (cache hits skip it).
///
/// Every method defaults to a no-op; implement only what you need.
pub trait SummonsExtension: Send + Sync {
    /// Adds wrapper classes for custom docTypes.
    fn register_wrapper_classes(&self, registry: &mut WrapperRegistry) {
        let _ = registry;
    }

    /// Adds pack sources that are not part of the host's catalog.
    fn register_custom_packs(&self, packs: &mut CustomPacks) {
        let _ = packs;
    }

    /// Adds or adjusts table columns.
    fn register_columns(&self, columns: &mut ColumnRegistryBuilder) {
        let _ = columns;
    }

    /// Inspects or augments the freshly assembled index in place.
    fn on_loading_packs(&self, index: &mut Vec<DocWrapper>) {
        let _ = index;
    }
}
