//! Instrumented searches: linear (alias sequential), binary and fuzzy "contains".

use crate::compare::{fold_case, folded, search_ordering};
use crate::core::{FieldAccessor, Value, extract_value};
use crate::error::Error;
use crate::outcome::{Complexity, SearchOutcome};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// The searching algorithms, identified by `linear`, `sequential` and `binary`.
///
/// `Sequential` is an alias of `Linear` and runs the same scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    #[default]
    Linear,
    Sequential,
    Binary,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 3] = [
        SearchAlgorithm::Linear,
        SearchAlgorithm::Sequential,
        SearchAlgorithm::Binary,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SearchAlgorithm::Linear => "linear",
            SearchAlgorithm::Sequential => "sequential",
            SearchAlgorithm::Binary => "binary",
        }
    }

    pub const fn complexity(self) -> Complexity {
        match self {
            SearchAlgorithm::Linear | SearchAlgorithm::Sequential => Complexity::Linear,
            SearchAlgorithm::Binary => Complexity::Logarithmic,
        }
    }

    /// Returns `true` if the algorithm needs its input sorted ascending by the key.
    pub const fn requires_sorted_input(self) -> bool {
        matches!(self, SearchAlgorithm::Binary)
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| Error::UnknownAlgorithm {
                kind: "search",
                name: s.to_string(),
            })
    }
}

/// Searches `data` for `target` with the chosen algorithm.
pub fn search<R: FieldAccessor>(
    algorithm: SearchAlgorithm,
    data: &[R],
    target: impl Into<Value>,
    key: Option<&str>,
) -> SearchOutcome {
    match algorithm {
        SearchAlgorithm::Linear => linear_search(data, target, key),
        SearchAlgorithm::Sequential => sequential_search(data, target, key),
        SearchAlgorithm::Binary => binary_search(data, target, key),
    }
}

/// Scans `data` in order for the first record whose `key` equals `target`.
///
/// Both sides are compared by string form, lowercased when the value is text.
/// +1 step per record visited, so a miss costs exactly `data.len()` steps.
///
/// # Examples
///
/// ```
/// use rowsort::search::linear_search;
///
/// let names = vec!["Bob", "alice", "Carol"];
/// let outcome = linear_search(&names, "ALICE", None);
///
/// assert_eq!(outcome.index, Some(1));
/// assert_eq!(outcome.steps, 2);
/// ```
pub fn linear_search<R: FieldAccessor>(
    data: &[R],
    target: impl Into<Value>,
    key: Option<&str>,
) -> SearchOutcome {
    let start = Instant::now();
    let target = equality_form(&target.into());
    let mut steps = 0;
    let mut found = None;

    for (index, record) in data.iter().enumerate() {
        steps += 1;
        if equality_form(&extract_value(record, key)) == target {
            found = Some(index);
            break;
        }
    }

    finish(SearchAlgorithm::Linear, data.len(), found, steps, start)
}

/// Alias of [`linear_search`].
pub fn sequential_search<R: FieldAccessor>(
    data: &[R],
    target: impl Into<Value>,
    key: Option<&str>,
) -> SearchOutcome {
    linear_search(data, target, key)
}

/// Classic lo/hi binary search for `target` on `key`.
///
/// `data` must already be sorted ascending by `key`; otherwise the result is
/// unspecified (but the call still terminates without panicking).
///
/// At each probe the target is coerced to the type of the midpoint's value.
/// When that fails, lowercased string forms decide both equality and direction,
/// so a malformed target for a numeric field reads as "not found" rather than
/// an error. +1 step per probe.
///
/// # Examples
///
/// ```
/// use rowsort::search::binary_search;
/// use serde_json::json;
///
/// let rows = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
/// let outcome = binary_search(&rows, "2", Some("id"));
///
/// assert_eq!(outcome.index, Some(1));
/// assert_eq!(outcome.steps, 1);
/// ```
pub fn binary_search<R: FieldAccessor>(
    data: &[R],
    target: impl Into<Value>,
    key: Option<&str>,
) -> SearchOutcome {
    let start = Instant::now();
    let target = target.into();
    let mut steps = 0;
    let mut found = None;
    let mut lo = 0usize;
    let mut hi = data.len();

    // Half-open [lo, hi); same probes as the inclusive lo <= hi formulation.
    while lo < hi {
        steps += 1;
        let mid = lo + (hi - 1 - lo) / 2;
        let value = extract_value(&data[mid], key);

        match search_ordering(&value, &target) {
            Ordering::Equal => {
                found = Some(mid);
                break;
            }
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }

    finish(SearchAlgorithm::Binary, data.len(), found, steps, start)
}

/// Returns every record whose `key` contains `query`, ignoring case.
///
/// Input order is preserved. An empty query matches every record.
pub fn fuzzy_contains_search<'a, R: FieldAccessor>(
    data: &'a [R],
    key: Option<&str>,
    query: &str,
) -> Vec<&'a R> {
    let query = fold_case(query);
    data.iter()
        .filter(|record| folded(&extract_value(*record, key)).contains(&query))
        .collect()
}

/// Multi-field [`fuzzy_contains_search`].
///
/// Concatenates the matches of each key in turn and keeps the first occurrence
/// of every record, identified by the string form of `identity_key`.
///
/// ```
/// use rowsort::search::fuzzy_contains_any;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({"id": "12", "name": "Ann"}),
///     json!({"id": "31", "name": "Ben"}),
///     json!({"id": "40", "name": "Al1"}),
/// ];
/// let hits = fuzzy_contains_any(&rows, &["name", "id"], "1", "id");
///
/// // "Al1" matches by name first, then "12" and "31" by id.
/// assert_eq!(hits, vec![&rows[2], &rows[0], &rows[1]]);
/// ```
pub fn fuzzy_contains_any<'a, R: FieldAccessor>(
    data: &'a [R],
    keys: &[&str],
    query: &str,
    identity_key: &str,
) -> Vec<&'a R> {
    let mut seen = HashSet::new();
    keys.iter()
        .flat_map(|key| fuzzy_contains_search(data, Some(*key), query))
        .filter(|record| seen.insert(extract_value(*record, Some(identity_key)).to_string()))
        .collect()
}

/// String form used for linear equality: lowercased for text, verbatim otherwise.
fn equality_form(value: &Value) -> String {
    match value {
        Value::Text(s) => fold_case(s),
        other => other.to_string(),
    }
}

fn finish(
    algorithm: SearchAlgorithm,
    len: usize,
    found: Option<usize>,
    steps: u64,
    start: Instant,
) -> SearchOutcome {
    let elapsed = start.elapsed();
    debug!(
        %algorithm,
        len,
        found = found.is_some(),
        steps,
        elapsed_us = elapsed.as_micros() as u64,
        "search finished"
    );
    SearchOutcome::new(found, steps, algorithm.complexity(), elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("linear".parse::<SearchAlgorithm>().unwrap(), SearchAlgorithm::Linear);
        assert_eq!(
            "sequential".parse::<SearchAlgorithm>().unwrap(),
            SearchAlgorithm::Sequential
        );
        assert_eq!("binary".parse::<SearchAlgorithm>().unwrap(), SearchAlgorithm::Binary);
        assert!("Binary".parse::<SearchAlgorithm>().is_err());
    }

    #[test]
    fn test_sequential_matches_linear() {
        let data = [4, 8, 15, 16, 23, 42];
        let linear = linear_search(&data, 23, None);
        let sequential = search(SearchAlgorithm::Sequential, &data, 23, None);
        assert_eq!(sequential.index, linear.index);
        assert_eq!(sequential.steps, linear.steps);
        assert_eq!(sequential.complexity, Complexity::Linear);
    }

    #[test]
    fn test_linear_string_forms() {
        let rows = vec![json!({"gpa": 3.0}), json!({"gpa": 3.5})];
        assert_eq!(linear_search(&rows, "3.5", Some("gpa")).index, Some(1));
        assert_eq!(linear_search(&rows, 3.0, Some("gpa")).index, Some(0));
        // Integer "3" does not render like the float 3.0.
        assert_eq!(linear_search(&rows, "3", Some("gpa")).index, None);
    }

    #[test]
    fn test_linear_miss_scans_everything() {
        let data = ["a", "b", "c"];
        let outcome = linear_search(&data, "z", None);
        assert!(!outcome.found);
        assert_eq!(outcome.position(), -1);
        assert_eq!(outcome.steps, 3);
    }

    #[test]
    fn test_binary_probe_counts() {
        let data: Vec<i32> = (0..7).collect();
        // Midpoint of 0..=6 is 3: found in one probe.
        assert_eq!(binary_search(&data, 3, None).steps, 1);
        // 0 needs probes at 3, 1, 0.
        let outcome = binary_search(&data, 0, None);
        assert_eq!(outcome.index, Some(0));
        assert_eq!(outcome.steps, 3);
        // 7 probes 3, 5, 6 then gives up.
        let miss = binary_search(&data, 7, None);
        assert_eq!(miss.index, None);
        assert_eq!(miss.steps, 3);
    }

    #[test]
    fn test_binary_case_insensitive_text() {
        let data = ["alice", "Bob", "carol"];
        assert_eq!(binary_search(&data, "BOB", None).index, Some(1));
        assert_eq!(binary_search(&data, "Carol", None).index, Some(2));
    }

    #[test]
    fn test_binary_malformed_numeric_target_is_not_found() {
        let data = [1, 2, 3];
        let outcome = binary_search(&data, "two", None);
        assert!(!outcome.found);
        assert!(outcome.steps >= 1);
    }

    #[test]
    fn test_greek_text_sorted_then_searched() {
        let words = ["ΟΔΟΣ", "οδοσα", "ΑΣ", "ασα", "Σ"];
        let sorted = crate::sort::merge_sort(&words, None, true);
        for word in words {
            let hit = binary_search(&sorted.data, word, None);
            assert_eq!(sorted.data[hit.index.unwrap()], &word, "{word}");
            assert!(linear_search(&words, word.to_uppercase(), None).found, "{word}");
        }
        assert_eq!(fuzzy_contains_search(&words, None, "ΟΣ").len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        for algorithm in SearchAlgorithm::ALL {
            let outcome = search(algorithm, &empty, "x", None);
            assert_eq!(outcome.index, None);
            assert_eq!(outcome.steps, 0);
        }
        assert!(fuzzy_contains_search(&empty, None, "x").is_empty());
    }

    #[test]
    fn test_fuzzy_contains_preserves_order() {
        let names = ["Maria", "mario", "Luigi", "AMARO"];
        let hits = fuzzy_contains_search(&names, None, "mar");
        assert_eq!(hits, vec![&"Maria", &"mario", &"AMARO"]);
        assert_eq!(fuzzy_contains_search(&names, None, "").len(), 4);
    }

    #[test]
    fn test_fuzzy_contains_any_dedups() {
        let rows = vec![
            json!({"id": "101", "name": "Dana"}),
            json!({"id": "202", "name": "Eli"}),
        ];
        let hits = fuzzy_contains_any(&rows, &["name", "id"], "0", "id");
        assert_eq!(hits, vec![&rows[0], &rows[1]]);
        let hits = fuzzy_contains_any(&rows, &["name", "id"], "da", "id");
        assert_eq!(hits, vec![&rows[0]]);
    }
}
