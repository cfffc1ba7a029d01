//! Document wrapper model for the summons index.
//!
//! Index entries arrive from pack sources as loose JSON records whose shape
//! depends on the game system. This crate normalizes them:
//! - [`DocWrapper`]: a validated entry (docType, uuid, name, id + raw fields)
//! - [`WrapperClass`]: per-docType behavior (extra validation, post-wrap fixups, document loading)
//! - [`WrapperRegistry`]: the docType → class table, seeded with [`BaseWrapper`]
//! - [`SerializedWrapper`]: the `{docType, document}` transfer form
//!
//! Construction is fallible: an entry without a name or uuid never becomes a
//! `DocWrapper`, the caller gets a [`ModelError`] and decides what to do.

mod class;
mod error;
mod registry;
mod wrapper;

pub use class::{BaseWrapper, DocumentResolver, WrapperClass};
pub use error::{ModelError, ModelResult};
pub use registry::{WrapperInput, WrapperRegistry};
pub use wrapper::{DocWrapper, RawEntry, SerializedWrapper, BASE_DOC_TYPE};
