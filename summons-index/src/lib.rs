//! Pack loading and indexing for the summon menu.
//!
//! A [`SummonsSession`] is the one object a host keeps around. It owns:
//! - the wrapper class table and the column table (both frozen after startup)
//! - the custom pack sources registered by extensions
//! - the cached creature index
//!
//! [`SummonsSession::load_packs`] walks the configured packs in order. Each
//! pack's field-restricted index is enriched for the active ruleset, each
//! entry is wrapped, and invalid entries are reported and dropped. The result
//! is cached as an `Arc<Vec<DocWrapper>>` that later calls hand out again
//! until a refresh is requested.

pub mod art;
pub mod config;
pub mod enrich;
pub mod error;
pub mod extension;
pub mod progress;
pub mod session;
pub mod source;

pub use art::{ArtService, StaticArt};
pub use config::{DEFAULT_PLACEHOLDER_ICON, SummonsConfig};
pub use enrich::{Dnd5eEnricher, Pf2eEnricher, RulesetEnricher, alignment_traits, apply_art};
pub use error::{IndexError, IndexResult};
pub use extension::SummonsExtension;
pub use progress::{LogProgress, Progress, ProgressDisplay};
pub use session::{Index, LoadOptions, SummonsSession, SummonsSessionBuilder};
pub use source::{
    ALWAYS_INDEXED, CustomPacks, MemoryCatalog, MemoryPack, PackCatalog, PackDescriptor,
    PackSource, deduplicate, project_entry,
};
