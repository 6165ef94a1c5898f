//! # Rowsort
//!
//! `rowsort` implements the classic comparison sorts and searches over caller-owned
//! records, with step counting and timing for display.
//!
//! ## Key Features
//!
//! - **Any Record Shape**: The [`FieldAccessor`] trait reads named fields out of structs,
//!   `HashMap`/`BTreeMap` rows, JSON objects or bare primitives. A missing field falls
//!   back to the record itself instead of failing.
//! - **One Comparison Policy**: Text compares case-insensitively, integers and floats
//!   compare numerically, and values with no common order fall back to their string forms.
//! - **Identical Orderings**: Bubble, selection, insertion, merge and shell sort share one
//!   placement decision and break ties by input position, so they always agree on the
//!   output. Only the step count differs.
//! - **Non-Mutating**: Sorts return a new sequence of borrowed records; the input slice is
//!   never touched.
//! - **Record Manager**: [`manager`] adds a validated student record model, a CRUD
//!   capability trait and the form-level sort/search flows.
//!
//! ## Usage
//!
//! ### Sorting
//!
//! ```rust
//! use rowsort::prelude::*;
//!
//! let names = vec!["Bob", "alice", "Carol"];
//! let outcome = bubble_sort(&names, None, true);
//!
//! assert_eq!(outcome.data, vec![&"alice", &"Bob", &"Carol"]);
//! assert_eq!(outcome.complexity.label(), "O(n^2)");
//! ```
//!
//! ### Records and Searching
//!
//! ```rust
//! use rowsort::prelude::*;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"id": "3", "gpa": 2.5}),
//!     json!({"id": "1", "gpa": 3.8}),
//!     json!({"id": "2", "gpa": 3.0}),
//! ];
//!
//! let sorted = merge_sort(&records, Some("id"), true);
//! assert_eq!(sorted.indices(), &[1, 2, 0]);
//!
//! let hit = binary_search(&sorted.data, "2", Some("id"));
//! assert_eq!(hit.index, Some(1));
//! ```
//!
//! ### Custom Types
//!
//! Implement [`FieldAccessor`] to expose your own fields.
//!
//! ```rust
//! use rowsort::{insertion_sort, FieldAccessor, Value};
//!
//! struct City {
//!     name: String,
//!     population: u32,
//! }
//!
//! impl FieldAccessor for City {
//!     fn get_field(&self, key: &str) -> Option<Value> {
//!         match key {
//!             "name" => Some(Value::from(self.name.as_str())),
//!             "population" => Some(Value::from(self.population)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn to_value(&self) -> Value {
//!         Value::from(self.name.as_str())
//!     }
//! }
//!
//! let cities = vec![
//!     City { name: "Oslo".to_string(), population: 709_000 },
//!     City { name: "Bergen".to_string(), population: 291_000 },
//! ];
//!
//! let outcome = insertion_sort(&cities, Some("population"), false);
//! assert_eq!(outcome.data[0].name, "Oslo");
//! ```
//!
//! ## Instrumentation
//!
//! Step counts follow fixed per-algorithm rules (see each function) and are meant for
//! teaching, not benchmarking. Elapsed time is measured with [`std::time::Instant`].
//! Completed sorts and searches emit `tracing` events at `debug` level.

pub mod compare;
pub mod config;
pub mod core;
pub mod error;
pub mod manager;
pub mod outcome;
pub mod search;
pub mod sort;

pub use compare::{Comparator, coerce_for_search, compare_values};
pub use config::ManagerConfig;
pub use crate::core::{FieldAccessor, Value, extract_value};
pub use error::{Error, Result};
pub use outcome::{Complexity, SearchOutcome, SortOutcome};
pub use search::{
    SearchAlgorithm, binary_search, fuzzy_contains_any, fuzzy_contains_search, linear_search,
    search, sequential_search,
};
pub use sort::{
    SortAlgorithm, bubble_sort, insertion_sort, merge_sort, selection_sort, shell_sort, sort,
};

pub mod prelude {
    pub use crate::core::{FieldAccessor, Value, extract_value};
    pub use crate::outcome::{Complexity, SearchOutcome, SortOutcome};
    pub use crate::search::{
        SearchAlgorithm, binary_search, fuzzy_contains_any, fuzzy_contains_search,
        linear_search, search, sequential_search,
    };
    pub use crate::sort::{
        SortAlgorithm, bubble_sort, insertion_sort, merge_sort, selection_sort, shell_sort, sort,
    };
}
