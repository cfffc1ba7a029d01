use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use summons_model::DocWrapper;

use crate::compare::ambi_sort;

/// Extracts a column's sort value from a row. Missing data is `None`.
pub type ValueFn = Arc<dyn Fn(&DocWrapper) -> Option<Value> + Send + Sync>;

/// Orders two rows.
pub type CompareFn = Arc<dyn Fn(&DocWrapper, &DocWrapper) -> Ordering + Send + Sync>;

/// Produces the display string for a cell.
pub type RenderFn = Arc<dyn Fn(&DocWrapper) -> String + Send + Sync>;

/// A named, sortable, renderable projection of a row.
#[derive(Clone)]
pub struct ColumnDefinition {
    name: String,
    value: ValueFn,
    compare: CompareFn,
    render: Option<RenderFn>,
}

impl ColumnDefinition {
    /// Creates a column whose comparator is [`ambi_sort`] over the extracted values.
    pub fn new<F>(name: impl Into<String>, value: F) -> Self
    where
        F: Fn(&DocWrapper) -> Option<Value> + Send + Sync + 'static,
    {
        let value: ValueFn = Arc::new(value);
        let extract = Arc::clone(&value);
        let compare: CompareFn = Arc::new(move |a: &DocWrapper, b: &DocWrapper| {
            ambi_sort(extract(a).as_ref(), extract(b).as_ref(), false)
        });
        Self {
            name: name.into(),
            value,
            compare,
            render: None,
        }
    }

    /// Creates a column reading a JSON pointer (e.g. "/system/details/cr").
    pub fn pointer(name: impl Into<String>, pointer: &str) -> Self {
        let pointer = pointer.to_string();
        Self::new(name, move |w: &DocWrapper| w.pointer(&pointer).cloned())
    }

    /// Replaces the derived comparator.
    pub fn with_compare<F>(mut self, compare: F) -> Self
    where
        F: Fn(&DocWrapper, &DocWrapper) -> Ordering + Send + Sync + 'static,
    {
        self.compare = Arc::new(compare);
        self
    }

    /// Attaches a cell renderer. Sorting is unaffected.
    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&DocWrapper) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw sort value of a row.
    pub fn value(&self, row: &DocWrapper) -> Option<Value> {
        (self.value)(row)
    }

    /// Orders two rows by this column.
    pub fn compare(&self, a: &DocWrapper, b: &DocWrapper) -> Ordering {
        (self.compare)(a, b)
    }

    /// Display string for a cell: the renderer's output if there is one,
    /// the plain value otherwise.
    pub fn render(&self, row: &DocWrapper) -> String {
        match &self.render {
            Some(render) => render(row),
            None => plain_text(self.value(row).as_ref()),
        }
    }

    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }
}

impl fmt::Debug for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDefinition")
            .field("name", &self.name)
            .field("has_renderer", &self.render.is_some())
            .finish_non_exhaustive()
    }
}

/// Text form of a sort value: strings bare, null/absent empty, everything else as JSON.
pub(crate) fn plain_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
