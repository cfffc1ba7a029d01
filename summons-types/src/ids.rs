//! Identifier types used throughout the summons index.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier of a game-rule system (the host's `system.id`).
///
/// Rulesets are open-ended: the two built-in ones have constants, anything
/// else is carried through untouched and simply gets no built-in behavior.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesetId(Cow<'static, str>);

impl RulesetId {
    /// Pathfinder Second Edition.
    pub const PF2E: RulesetId = RulesetId(Cow::Borrowed("pf2e"));

    /// Dungeons & Dragons Fifth Edition.
    pub const DND5E: RulesetId = RulesetId(Cow::Borrowed("dnd5e"));

    /// Creates a ruleset id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RulesetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RulesetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RulesetId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for RulesetId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
