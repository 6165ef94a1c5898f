//! Comparison policy shared by the sorting and searching algorithms.
//!
//! - Text compares case-insensitively.
//! - Integers and floats compare numerically with each other.
//! - Pairs with no natural order (number vs text, null vs anything else) fall back
//!   to comparing their lowercased string forms. Nothing here panics.

use crate::core::{SortEntry, Value};
use std::cmp::Ordering;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Category {
    Null,
    Bool,
    Number,
    Text,
}

fn category(value: &Value) -> Category {
    match value {
        Value::Null => Category::Null,
        Value::Bool(_) => Category::Bool,
        Value::Int(_) | Value::Float(_) => Category::Number,
        Value::Text(_) => Category::Text,
    }
}

/// Natural order of two values, or `None` when the pair has no natural order.
fn natural_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => Some(cmp_ignore_case(x, y)),
        (Value::Int(x), Value::Int(y)) => Some(x.cmp(y)),
        (Value::Int(x), Value::Float(y)) => Some(cmp_int_float(*x, *y)),
        (Value::Float(x), Value::Int(y)) => Some(cmp_int_float(*y, *x).reverse()),
        (Value::Float(x), Value::Float(y)) => Some(cmp_floats(*x, *y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Numeric equality ignores the sign of zero; NaN orders by `total_cmp`.
fn cmp_floats(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y))
}

/// Exact comparison of an integer with a float. Never rounds the integer.
fn cmp_int_float(x: i64, y: f64) -> Ordering {
    // 2^63, the first float past i64::MAX.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if y.is_nan() {
        return if y.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if y >= LIMIT {
        return Ordering::Less;
    }
    if y < -LIMIT {
        return Ordering::Greater;
    }

    // In range, so the floor converts to i64 without loss.
    let floor = y.floor();
    match x.cmp(&(floor as i64)) {
        Ordering::Equal if y > floor => Ordering::Less,
        ordering => ordering,
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Lowercases text one char at a time, the same way text comparisons do.
///
/// Unlike [`str::to_lowercase`] there is no final-sigma rule, so a folded key
/// compares exactly like its unfolded original.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Lowercased string form of a value.
pub fn folded(value: &Value) -> String {
    match value {
        Value::Text(s) => fold_case(s),
        other => fold_case(&other.to_string()),
    }
}

fn string_form_cmp(a: &Value, b: &Value) -> Ordering {
    folded(a).cmp(&folded(b))
}

/// Three-way comparison under the loose policy: natural order when the pair has
/// one, lowercased string forms otherwise.
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
    natural_cmp(a, b).unwrap_or_else(|| string_form_cmp(a, b))
}

/// Returns `true` if `a` must be ordered after `b`.
///
/// Ascending asks "is `a > b`", descending asks "is `a < b`". Equal values never
/// need to move.
///
/// ```
/// use rowsort::compare::compare_values;
/// use rowsort::core::Value;
///
/// assert!(compare_values(&Value::from("bob"), &Value::from("Alice"), true));
/// assert!(!compare_values(&Value::from("ALICE"), &Value::from("alice"), true));
/// assert!(compare_values(&Value::Int(1), &Value::Float(2.5), false));
/// ```
pub fn compare_values(a: &Value, b: &Value, ascending: bool) -> bool {
    is_after(loose_cmp(a, b), ascending)
}

#[inline(always)]
fn is_after(ordering: Ordering, ascending: bool) -> bool {
    if ascending {
        ordering == Ordering::Greater
    } else {
        ordering == Ordering::Less
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Natural,
    StringForm,
}

/// The ordering used for one sort call.
///
/// Built from every key the call will compare. When those keys share a category
/// their natural order is used. A mix of categories has no total natural order,
/// so the whole call switches to string-form comparison instead.
///
/// Keys must go through [`Comparator::normalize`] before they are compared.
#[derive(Clone, Copy, Debug)]
pub struct Comparator {
    ascending: bool,
    mode: Mode,
}

impl Comparator {
    /// Picks the comparison mode for the given keys.
    pub fn for_values<'v, I>(values: I, ascending: bool) -> Self
    where
        I: IntoIterator<Item = &'v Value>,
    {
        let mut categories = values.into_iter().map(category);
        let mode = match categories.next() {
            Some(first) if categories.all(|c| c == first) => Mode::Natural,
            Some(_) => Mode::StringForm,
            None => Mode::Natural,
        };
        if mode == Mode::StringForm {
            trace!("mixed key types, comparing string forms");
        }
        Self { ascending, mode }
    }

    /// Returns `true` if the call fell back to string-form comparison.
    pub fn is_string_form(&self) -> bool {
        self.mode == Mode::StringForm
    }

    /// Converts a raw key into the form this comparator orders.
    ///
    /// Text is lowercased once here instead of on every comparison.
    pub fn normalize(&self, value: Value) -> Value {
        match (self.mode, value) {
            (Mode::StringForm, value) => Value::Text(folded(&value)),
            (Mode::Natural, Value::Text(s)) => Value::Text(fold_case(&s)),
            (Mode::Natural, value) => value,
        }
    }

    /// Three-way comparison of two normalized keys.
    pub fn ordering(&self, a: &Value, b: &Value) -> Ordering {
        loose_cmp(a, b)
    }

    /// Returns `true` if normalized key `a` must be ordered after `b`.
    pub fn is_after(&self, a: &Value, b: &Value) -> bool {
        is_after(self.ordering(a, b), self.ascending)
    }

    /// Entry comparison used by the sorting algorithms.
    ///
    /// Equal keys are ordered by input position in both directions, which makes
    /// every algorithm produce the same stable ordering.
    #[inline(always)]
    pub(crate) fn entry_after(&self, a: &SortEntry, b: &SortEntry) -> bool {
        match self.ordering(&a.key, &b.key) {
            Ordering::Equal => a.index > b.index,
            ordering => is_after(ordering, self.ascending),
        }
    }
}

/// Converts a search target into the type of `candidate`.
///
/// Returns `None` when the conversion is not possible; callers then compare
/// lowercased string forms of both sides instead.
///
/// ```
/// use rowsort::compare::coerce_for_search;
/// use rowsort::core::Value;
///
/// assert_eq!(coerce_for_search(&Value::Int(3), &Value::from(" 42 ")), Some(Value::Int(42)));
/// assert_eq!(coerce_for_search(&Value::Float(3.5), &Value::from("2")), Some(Value::Float(2.0)));
/// assert_eq!(coerce_for_search(&Value::Int(3), &Value::from("abc")), None);
/// ```
pub fn coerce_for_search(candidate: &Value, target: &Value) -> Option<Value> {
    match (candidate, target) {
        (Value::Text(_), Value::Text(t)) => Some(Value::Text(t.clone())),
        (Value::Text(_), other) => Some(Value::Text(other.to_string())),

        (Value::Int(_), Value::Int(t)) => Some(Value::Int(*t)),
        (Value::Int(_), Value::Float(t)) => Some(Value::Float(*t)),
        (Value::Int(_), Value::Bool(t)) => Some(Value::Int(i64::from(*t))),
        (Value::Int(_), Value::Text(t)) => t.trim().parse::<i64>().ok().map(Value::Int),

        (Value::Float(_), Value::Int(t)) => Some(Value::Float(*t as f64)),
        (Value::Float(_), Value::Float(t)) => Some(Value::Float(*t)),
        (Value::Float(_), Value::Bool(t)) => Some(Value::Float(f64::from(u8::from(*t)))),
        (Value::Float(_), Value::Text(t)) => t.trim().parse::<f64>().ok().map(Value::Float),

        (Value::Bool(_), Value::Bool(t)) => Some(Value::Bool(*t)),
        (Value::Bool(_), Value::Int(t)) => Some(Value::Bool(*t != 0)),
        (Value::Bool(_), Value::Float(t)) => Some(Value::Bool(*t != 0.0)),
        (Value::Bool(_), Value::Text(t)) => match t.trim().to_lowercase().as_str() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },

        (Value::Null, Value::Null) => Some(Value::Null),
        _ => None,
    }
}

/// Orders `candidate` relative to a search `target`.
///
/// The target is coerced to the candidate's type first. On failure both sides
/// are compared as lowercased strings, for equality and for direction.
pub fn search_ordering(candidate: &Value, target: &Value) -> Ordering {
    match coerce_for_search(candidate, target).and_then(|t| natural_cmp(candidate, &t)) {
        Some(ordering) => ordering,
        None => {
            trace!(%candidate, %target, "coercion failed, comparing string forms");
            string_form_cmp(candidate, target)
        }
    }
}
