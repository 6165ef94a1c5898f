//! Result types returned by the sorting and searching algorithms.
//!
//! Both outcomes carry instrumentation for display: a step count, an
//! informational complexity label and the elapsed wall time.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Informational complexity label of an algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Complexity {
    #[serde(rename = "O(log n)")]
    Logarithmic,
    #[serde(rename = "O(n)")]
    Linear,
    #[serde(rename = "O(n log n)")]
    Linearithmic,
    #[serde(rename = "O(n log n) - O(n^2)")]
    GapDependent,
    #[serde(rename = "O(n^2)")]
    Quadratic,
}

impl Complexity {
    pub const fn label(self) -> &'static str {
        match self {
            Complexity::Logarithmic => "O(log n)",
            Complexity::Linear => "O(n)",
            Complexity::Linearithmic => "O(n log n)",
            Complexity::GapDependent => "O(n log n) - O(n^2)",
            Complexity::Quadratic => "O(n^2)",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Formats a duration the way outcomes are displayed, e.g. `0.0123 ms`.
pub fn elapsed_label(elapsed: Duration) -> String {
    format!("{:.4} ms", elapsed.as_secs_f64() * 1000.0)
}

fn serialize_elapsed<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&elapsed_label(*elapsed))
}

fn serialize_position<S: Serializer>(
    index: &Option<usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(index.map_or(-1, |i| i as i64))
}

/// Result of a sort call.
///
/// `data` is a new sequence borrowing the caller's records; the input slice is
/// left untouched.
#[derive(Debug, Serialize)]
pub struct SortOutcome<'a, R> {
    pub data: Vec<&'a R>,
    #[serde(skip)]
    pub(crate) order: Vec<usize>,
    pub steps: u64,
    pub complexity: Complexity,
    #[serde(serialize_with = "serialize_elapsed")]
    pub elapsed: Duration,
}

impl<'a, R> SortOutcome<'a, R> {
    /// Positions of the sorted records in the input slice.
    pub fn indices(&self) -> &[usize] {
        &self.order
    }

    pub fn elapsed_label(&self) -> String {
        elapsed_label(self.elapsed)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clones the sorted records out of the borrowed input.
    pub fn into_owned(self) -> Vec<R>
    where
        R: Clone,
    {
        self.data.into_iter().cloned().collect()
    }
}

/// Result of a linear or binary search call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Matched position, serialized as `-1` when nothing matched.
    #[serde(serialize_with = "serialize_position")]
    pub index: Option<usize>,
    pub steps: u64,
    pub complexity: Complexity,
    #[serde(serialize_with = "serialize_elapsed")]
    pub elapsed: Duration,
    pub found: bool,
}

impl SearchOutcome {
    pub(crate) fn new(
        index: Option<usize>,
        steps: u64,
        complexity: Complexity,
        elapsed: Duration,
    ) -> Self {
        Self {
            index,
            steps,
            complexity,
            elapsed,
            found: index.is_some(),
        }
    }

    /// The matched position with `-1` standing for "not found".
    pub fn position(&self) -> isize {
        self.index.map_or(-1, |i| i as isize)
    }

    pub fn elapsed_label(&self) -> String {
        elapsed_label(self.elapsed)
    }
}
