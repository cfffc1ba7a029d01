//! Shared type definitions for the summons index.
//!
//! This crate holds the small, host-agnostic pieces every other layer needs:
//! - [`RulesetId`], the identifier of the active game system
//! - [`Localizer`], the string table used for headers and notifications
//! - [`Notifier`], the user-visible notification service
//!
//! Nothing here knows about packs, wrappers or columns.

mod i18n;
mod ids;
mod notify;

pub use i18n::{EnglishLocalizer, Localizer, MODULE_NAMESPACE};
pub use ids::RulesetId;
pub use notify::{LogNotifier, Notifier};

/// Prefix prepended to every user-facing diagnostic.
pub const MODULE_TITLE: &str = "Hazard Foundry Summons";
