//! Per-ruleset column lists.
//!
//! Filled in two phases: built-in columns first, then extensions; once
//! [`ColumnRegistryBuilder::build`] runs the registry no longer changes.

use std::collections::HashMap;
use summons_types::{Localizer, RulesetId};
use tracing::debug;

use crate::column::ColumnDefinition;
use crate::rulesets::{dnd5e, pf2e};

/// Immutable column lists keyed by ruleset.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    columns: HashMap<RulesetId, Vec<ColumnDefinition>>,
}

impl ColumnRegistry {
    pub fn builder() -> ColumnRegistryBuilder {
        ColumnRegistryBuilder::new()
    }

    /// Columns for a ruleset, in display order. Empty for unknown rulesets.
    pub fn columns(&self, ruleset: &RulesetId) -> &[ColumnDefinition] {
        self.columns.get(ruleset).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A single column by position.
    pub fn column(&self, ruleset: &RulesetId, index: usize) -> Option<&ColumnDefinition> {
        self.columns(ruleset).get(index)
    }

    /// Rulesets that have columns, sorted.
    pub fn rulesets(&self) -> Vec<&RulesetId> {
        let mut ids: Vec<&RulesetId> = self.columns.keys().collect();
        ids.sort();
        ids
    }
}

/// Mutable stage of a [`ColumnRegistry`].
#[derive(Debug, Default)]
pub struct ColumnRegistryBuilder {
    columns: HashMap<RulesetId, Vec<ColumnDefinition>>,
}

impl ColumnRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the dnd5e and pf2e column sets.
    pub fn with_builtin(mut self, localizer: &dyn Localizer) -> Self {
        self.register(RulesetId::DND5E, dnd5e::columns(localizer));
        self.register(RulesetId::PF2E, pf2e::columns(localizer));
        self
    }

    /// Sets the full column list of a ruleset, replacing any previous one.
    pub fn register(&mut self, ruleset: RulesetId, columns: Vec<ColumnDefinition>) {
        debug!(ruleset = %ruleset, columns = columns.len(), "Columns registered");
        self.columns.insert(ruleset, columns);
    }

    /// Appends one column to a ruleset.
    pub fn push(&mut self, ruleset: RulesetId, column: ColumnDefinition) {
        self.columns.entry(ruleset).or_default().push(column);
    }

    /// Current columns of a ruleset (for extensions that reorder or wrap them).
    pub fn columns_mut(&mut self, ruleset: &RulesetId) -> Option<&mut Vec<ColumnDefinition>> {
        self.columns.get_mut(ruleset)
    }

    pub fn build(self) -> ColumnRegistry {
        ColumnRegistry {
            columns: self.columns,
        }
    }
}
