//! Column definitions for the summon selection table.
//!
//! A column is a named projection of a [`DocWrapper`](summons_model::DocWrapper):
//! a value extractor, a comparator over two rows, and an optional cell
//! renderer. Sorting always runs on the extracted value; the renderer only
//! affects what is displayed.
//!
//! Values across rows of one column are often of mixed type (a CR of `"1/2"`
//! next to `3`, a level missing entirely), so the default comparator is
//! [`ambi_sort`], which orders any pair of JSON values without failing.

mod column;
mod compare;
mod registry;
pub mod rulesets;
mod sort;

pub use column::{ColumnDefinition, CompareFn, RenderFn, ValueFn};
pub use compare::{ambi_sort, numeric_value};
pub use registry::{ColumnRegistry, ColumnRegistryBuilder};
pub use sort::{sort_rows, stable_sort_by};
