//! Row sorting that tolerates non-transitive comparators.
//!
//! [`ambi_sort`](crate::ambi_sort) treats objects as equal to everything,
//! which breaks transitivity on mixed columns. `slice::sort_by` may panic on
//! such comparators, so table sorting goes through a plain merge sort.

use std::cmp::Ordering;
use summons_model::DocWrapper;

use crate::column::ColumnDefinition;

/// Sorts rows by a column. Stable; `descending` reverses the comparator
/// (so missing values come first).
pub fn sort_rows(rows: &mut Vec<DocWrapper>, column: &ColumnDefinition, descending: bool) {
    stable_sort_by(rows, |a, b| {
        let ord = column.compare(a, b);
        if descending { ord.reverse() } else { ord }
    });
}

/// Stable merge sort. Never panics, whatever `cmp` returns.
pub fn stable_sort_by<T, F>(items: &mut Vec<T>, mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let taken = std::mem::take(items);
    *items = merge_sort(taken, &mut cmp);
}

fn merge_sort<T, F>(mut items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    out
}
