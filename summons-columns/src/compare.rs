//! Ordering for values of unknown and possibly mixed type.

use serde_json::Value;
use std::cmp::Ordering;

/// Orders two optional JSON values.
///
/// Precedence:
/// 1. `invert` reverses the non-inverted result.
/// 2. Equal values are `Equal`.
/// 3. Absent or `null` sorts after everything else.
/// 4. Two numeric values (numbers, booleans, numeric strings) compare as `f64`.
/// 5. Numeric vs non-numeric: the non-numeric side comes first.
/// 6. Two strings compare case-folded, lowercase before uppercase on ties.
/// 7. Anything else (objects, arrays) is incomparable and reported `Equal`.
///
/// Total: every pair of inputs gets an answer.
pub fn ambi_sort(lhs: Option<&Value>, rhs: Option<&Value>, invert: bool) -> Ordering {
    if invert {
        return ambi_sort(lhs, rhs, false).reverse();
    }

    let lhs = lhs.filter(|v| !v.is_null());
    let rhs = rhs.filter(|v| !v.is_null());
    match (lhs, rhs) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(l), Some(r)) => compare_present(l, r),
    }
}

fn compare_present(lhs: &Value, rhs: &Value) -> Ordering {
    if lhs == rhs {
        return Ordering::Equal;
    }
    match (numeric_value(lhs), numeric_value(rhs)) {
        (Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => match (lhs, rhs) {
            (Value::String(l), Value::String(r)) => locale_compare(l, r),
            _ => Ordering::Equal,
        },
    }
}

/// Numeric reading of a value: numbers, booleans (0/1) and strings holding
/// an optionally signed decimal or float literal.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty()
        || !s.bytes().any(|b| b.is_ascii_digit())
        || !s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn locale_compare(lhs: &str, rhs: &str) -> Ordering {
    lhs.to_lowercase()
        .cmp(&rhs.to_lowercase())
        .then_with(|| rhs.cmp(lhs))
}
