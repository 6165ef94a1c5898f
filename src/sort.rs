//! Instrumented comparison sorts: bubble, selection, insertion, merge and shell.
//!
//! Every algorithm works the same way:
//! 1. Extract each record's key once and normalize it ([`Comparator::normalize`]).
//! 2. Permute a vector of index/key entries, counting steps as it goes.
//! 3. Map the final permutation back to borrowed records.
//!
//! All five share [`Comparator::entry_after`] as their swap/placement decision, and
//! ties are broken by input position, so for the same input, key and direction
//! they return the same ordering. Only the step count and runtime differ.
//!
//! The main entry points are the per-algorithm functions and [`sort`].

use crate::compare::Comparator;
use crate::core::{FieldAccessor, SortEntry, extract_value};
use crate::error::Error;
use crate::outcome::{Complexity, SortOutcome};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

/// The sorting algorithms, identified by `bubble`, `selection`, `insertion`,
/// `merge` and `shell`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    #[default]
    Merge,
    Shell,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 5] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Shell,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "bubble",
            SortAlgorithm::Selection => "selection",
            SortAlgorithm::Insertion => "insertion",
            SortAlgorithm::Merge => "merge",
            SortAlgorithm::Shell => "shell",
        }
    }

    pub const fn complexity(self) -> Complexity {
        match self {
            SortAlgorithm::Bubble | SortAlgorithm::Selection | SortAlgorithm::Insertion => {
                Complexity::Quadratic
            }
            SortAlgorithm::Merge => Complexity::Linearithmic,
            SortAlgorithm::Shell => Complexity::GapDependent,
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Identifiers are case-sensitive.
impl FromStr for SortAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == s)
            .ok_or_else(|| Error::UnknownAlgorithm {
                kind: "sort",
                name: s.to_string(),
            })
    }
}

/// Sorts `data` by `key` with the chosen algorithm.
///
/// # Examples
///
/// ```
/// use rowsort::sort::{sort, SortAlgorithm};
///
/// let names = vec!["Bob", "alice", "Carol"];
/// let outcome = sort(SortAlgorithm::Insertion, &names, None, true);
///
/// assert_eq!(outcome.data, vec![&"alice", &"Bob", &"Carol"]);
/// ```
pub fn sort<'a, R: FieldAccessor>(
    algorithm: SortAlgorithm,
    data: &'a [R],
    key: Option<&str>,
    ascending: bool,
) -> SortOutcome<'a, R> {
    match algorithm {
        SortAlgorithm::Bubble => bubble_sort(data, key, ascending),
        SortAlgorithm::Selection => selection_sort(data, key, ascending),
        SortAlgorithm::Insertion => insertion_sort(data, key, ascending),
        SortAlgorithm::Merge => merge_sort(data, key, ascending),
        SortAlgorithm::Shell => shell_sort(data, key, ascending),
    }
}

/// Bubble sort.
///
/// +1 step per comparison and +1 per swap. Every pass runs to completion.
pub fn bubble_sort<'a, R: FieldAccessor>(
    data: &'a [R],
    key: Option<&str>,
    ascending: bool,
) -> SortOutcome<'a, R> {
    let start = Instant::now();
    let (mut entries, cmp) = prepare_entries(data, key, ascending);
    let n = entries.len();
    let mut steps = 0;

    for i in 0..n {
        for j in 0..n - i - 1 {
            steps += 1;
            if cmp.entry_after(&entries[j], &entries[j + 1]) {
                entries.swap(j, j + 1);
                steps += 1;
            }
        }
    }

    finish(SortAlgorithm::Bubble, data, entries, steps, start)
}

/// Selection sort.
///
/// +1 step per comparison and +1 per pass for the final swap, counted even when
/// the selected element is already in place.
pub fn selection_sort<'a, R: FieldAccessor>(
    data: &'a [R],
    key: Option<&str>,
    ascending: bool,
) -> SortOutcome<'a, R> {
    let start = Instant::now();
    let (mut entries, cmp) = prepare_entries(data, key, ascending);
    let n = entries.len();
    let mut steps = 0;

    for i in 0..n {
        let mut target = i;
        for j in i + 1..n {
            steps += 1;
            if cmp.entry_after(&entries[target], &entries[j]) {
                target = j;
            }
        }
        entries.swap(i, target);
        steps += 1;
    }

    finish(SortAlgorithm::Selection, data, entries, steps, start)
}

/// Insertion sort.
///
/// Per element: +1 for the initial check, +2 per shift (comparison and move)
/// and +1 for the final placement.
pub fn insertion_sort<'a, R: FieldAccessor>(
    data: &'a [R],
    key: Option<&str>,
    ascending: bool,
) -> SortOutcome<'a, R> {
    let start = Instant::now();
    let (mut entries, cmp) = prepare_entries(data, key, ascending);
    let mut steps = 0;

    for i in 1..entries.len() {
        // The element being inserted always sits at `j`.
        let mut j = i;
        steps += 1;
        while j > 0 && cmp.entry_after(&entries[j - 1], &entries[j]) {
            entries.swap(j - 1, j);
            steps += 2;
            j -= 1;
        }
        steps += 1;
    }

    finish(SortAlgorithm::Insertion, data, entries, steps, start)
}

/// Merge sort.
///
/// +1 step per merge comparison, +1 per append, and +1 per leftover element
/// copied after one side runs out.
pub fn merge_sort<'a, R: FieldAccessor>(
    data: &'a [R],
    key: Option<&str>,
    ascending: bool,
) -> SortOutcome<'a, R> {
    let start = Instant::now();
    let (entries, cmp) = prepare_entries(data, key, ascending);
    let (entries, steps) = merge_sort_entries(entries, &cmp);

    finish(SortAlgorithm::Merge, data, entries, steps, start)
}

/// Recursively sorts `entries`, returning them with the steps spent.
fn merge_sort_entries(mut entries: Vec<SortEntry>, cmp: &Comparator) -> (Vec<SortEntry>, u64) {
    if entries.len() <= 1 {
        return (entries, 0);
    }

    let right = entries.split_off(entries.len() / 2);
    let (left, left_steps) = merge_sort_entries(entries, cmp);
    let (right, right_steps) = merge_sort_entries(right, cmp);
    let (merged, merge_steps) = merge(left, right, cmp);

    (merged, left_steps + right_steps + merge_steps)
}

/// Merges two sorted runs. The left run wins ties, which keeps the sort stable.
fn merge(left: Vec<SortEntry>, right: Vec<SortEntry>, cmp: &Comparator) -> (Vec<SortEntry>, u64) {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut steps = 0;
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp.entry_after(l, r),
            _ => break,
        };
        steps += 1;
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
        steps += 1;
    }

    let before = merged.len();
    merged.extend(left);
    merged.extend(right);
    steps += (merged.len() - before) as u64;

    (merged, steps)
}

/// Shell sort with the halving gap sequence n/2, n/4, ..., 1.
///
/// +1 step per inner pass entered, +1 per shifted element and +1 per placement.
pub fn shell_sort<'a, R: FieldAccessor>(
    data: &'a [R],
    key: Option<&str>,
    ascending: bool,
) -> SortOutcome<'a, R> {
    let start = Instant::now();
    let (mut entries, cmp) = prepare_entries(data, key, ascending);
    let n = entries.len();
    let mut steps = 0;
    let mut gap = n / 2;

    while gap > 0 {
        for i in gap..n {
            let mut j = i;
            steps += 1;
            while j >= gap && cmp.entry_after(&entries[j - gap], &entries[j]) {
                entries.swap(j - gap, j);
                steps += 1;
                j -= gap;
            }
            steps += 1;
        }
        gap /= 2;
    }

    finish(SortAlgorithm::Shell, data, entries, steps, start)
}

/// Extracts and normalizes every key once, and picks the comparator for this call.
fn prepare_entries<R: FieldAccessor>(
    data: &[R],
    key: Option<&str>,
    ascending: bool,
) -> (Vec<SortEntry>, Comparator) {
    let keys: Vec<_> = data.iter().map(|record| extract_value(record, key)).collect();
    let cmp = Comparator::for_values(&keys, ascending);

    let entries = keys
        .into_iter()
        .enumerate()
        .map(|(index, key)| SortEntry {
            index,
            key: cmp.normalize(key),
        })
        .collect();

    (entries, cmp)
}

fn finish<'a, R>(
    algorithm: SortAlgorithm,
    data: &'a [R],
    entries: Vec<SortEntry>,
    steps: u64,
    start: Instant,
) -> SortOutcome<'a, R> {
    let order: Vec<usize> = entries.into_iter().map(|entry| entry.index).collect();
    let sorted = order.iter().map(|&index| &data[index]).collect();
    let elapsed = start.elapsed();

    debug!(
        %algorithm,
        len = data.len(),
        steps,
        elapsed_us = elapsed.as_micros() as u64,
        "sort finished"
    );

    SortOutcome {
        data: sorted,
        order,
        steps,
        complexity: algorithm.complexity(),
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted_ints(algorithm: SortAlgorithm, input: &[i32], ascending: bool) -> Vec<i32> {
        sort(algorithm, input, None, ascending)
            .data
            .into_iter()
            .copied()
            .collect()
    }

    #[test]
    fn test_parse_identifiers() {
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<SortAlgorithm>().unwrap(), algorithm);
        }
        assert!("Bubble".parse::<SortAlgorithm>().is_err());
        assert!("quick".parse::<SortAlgorithm>().is_err());
    }

    #[test]
    fn test_complexity_labels() {
        assert_eq!(SortAlgorithm::Bubble.complexity().label(), "O(n^2)");
        assert_eq!(SortAlgorithm::Merge.complexity().label(), "O(n log n)");
        assert_eq!(SortAlgorithm::Shell.complexity().label(), "O(n log n) - O(n^2)");
    }

    #[test]
    fn test_all_algorithms_sort_integers() {
        let input = [5, 2, 9, 1, 5, 6, 0, -3];
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(
                sorted_ints(algorithm, &input, true),
                vec![-3, 0, 1, 2, 5, 5, 6, 9],
                "{algorithm}"
            );
            assert_eq!(
                sorted_ints(algorithm, &input, false),
                vec![9, 6, 5, 5, 2, 1, 0, -3],
                "{algorithm}"
            );
        }
    }

    #[test]
    fn test_bubble_steps_on_reversed_input() {
        // 3 comparisons, every one swaps.
        let outcome = bubble_sort(&[3, 2, 1], None, true);
        assert_eq!(outcome.steps, 6);
        let sorted = bubble_sort(&[1, 2, 3], None, true);
        assert_eq!(sorted.steps, 3);
    }

    #[test]
    fn test_selection_counts_self_swaps() {
        // comparisons 2 + 1, swaps 3
        let outcome = selection_sort(&[1, 2, 3], None, true);
        assert_eq!(outcome.steps, 6);
        let single = selection_sort(&[7], None, true);
        assert_eq!(single.steps, 1);
    }

    #[test]
    fn test_insertion_steps() {
        // Sorted: 2 elements inserted with check + placement each.
        assert_eq!(insertion_sort(&[1, 2, 3], None, true).steps, 4);
        // Reversed: i=1 one shift, i=2 two shifts.
        assert_eq!(insertion_sort(&[3, 2, 1], None, true).steps, 4 + 2 * 3);
    }

    #[test]
    fn test_merge_steps() {
        // [2] + [1]: one comparison, one append, one leftover.
        assert_eq!(merge_sort(&[2, 1], None, true).steps, 3);
        // [1,2] vs [3,4]: sub-merges 3 each, top 2 comparisons + 2 appends + 2 leftovers.
        assert_eq!(merge_sort(&[1, 2, 3, 4], None, true).steps, 3 + 3 + 6);
    }

    #[test]
    fn test_shell_steps() {
        // n=2: gap 1, one pass entered, one shift, one placement.
        assert_eq!(shell_sort(&[2, 1], None, true).steps, 3);
        assert_eq!(shell_sort(&[1, 2], None, true).steps, 2);
    }

    #[test]
    fn test_empty_input() {
        let empty: [i32; 0] = [];
        for algorithm in SortAlgorithm::ALL {
            let outcome = sort(algorithm, &empty, None, true);
            assert!(outcome.is_empty());
            assert_eq!(outcome.steps, 0);
        }
    }

    #[test]
    fn test_input_is_untouched() {
        let input = vec![json!({"id": "2"}), json!({"id": "1"})];
        let snapshot = input.clone();
        let outcome = merge_sort(&input, Some("id"), true);
        assert_eq!(outcome.indices(), &[1, 0]);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_ties_keep_input_order_for_every_algorithm() {
        let input = vec![
            json!({"name": "a", "group": 2}),
            json!({"name": "b", "group": 1}),
            json!({"name": "c", "group": 2}),
            json!({"name": "d", "group": 1}),
            json!({"name": "e", "group": 2}),
        ];
        for algorithm in SortAlgorithm::ALL {
            let asc = sort(algorithm, &input, Some("group"), true);
            assert_eq!(asc.indices(), &[1, 3, 0, 2, 4], "{algorithm}");
            let desc = sort(algorithm, &input, Some("group"), false);
            assert_eq!(desc.indices(), &[0, 2, 4, 1, 3], "{algorithm}");
        }
    }

    #[test]
    fn test_mixed_types_fall_back_to_string_form() {
        let input = vec![json!({"v": 10}), json!({"v": "9"}), json!({"v": 2})];
        for algorithm in SortAlgorithm::ALL {
            // "10" < "2" < "9"
            assert_eq!(sort(algorithm, &input, Some("v"), true).indices(), &[0, 2, 1]);
        }
    }
}
