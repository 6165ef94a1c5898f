//! Student record management on top of the sorting and searching algorithms.
//!
//! - [`Student`] / [`NewStudent`]: the record type and its validated input form.
//! - [`RecordStore`]: CRUD capability implemented per storage backend.
//! - [`MemoryStore`]: in-process backend.
//! - [`StudentManager`]: validation plus the sort and search request flows.
//! - [`StudentStats`]: dashboard totals over the stored students.

use crate::compare::coerce_for_search;
use crate::config::ManagerConfig;
use crate::core::{FieldAccessor, Value, extract_value};
use crate::error::{ConfigError, Error, Result, StoreError, ValidationError};
use crate::outcome::{SearchOutcome, SortOutcome};
use crate::search::{SearchAlgorithm, fuzzy_contains_any, search};
use crate::sort::{SortAlgorithm, merge_sort, sort};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A stored student record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub gpa: f64,
}

impl Student {
    pub const FIELDS: [&'static str; 6] =
        ["id", "student_number", "name", "email", "department", "gpa"];
}

impl FieldAccessor for Student {
    fn get_field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::from(self.id)),
            "student_number" => Some(Value::from(self.student_number.as_str())),
            "name" => Some(Value::from(self.name.as_str())),
            "email" => Some(Value::from(self.email.as_str())),
            "department" => Some(Value::from(self.department.as_str())),
            "gpa" => Some(Value::from(self.gpa)),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::from(self.student_number.as_str())
    }
}

/// Input for creating or replacing a student.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub student_number: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub gpa: f64,
}

impl NewStudent {
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let number = &self.student_number;
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidStudentNumber(number.clone()));
        }

        let name = &self.name;
        if name.trim().is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '.')
        {
            return Err(ValidationError::InvalidName(name.clone()));
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }

        if !(0.0..=4.0).contains(&self.gpa) {
            return Err(ValidationError::GpaOutOfRange(self.gpa));
        }

        Ok(())
    }

    fn into_student(self, id: u64) -> Student {
        Student {
            id,
            student_number: self.student_number,
            name: self.name,
            email: self.email,
            department: self.department,
            gpa: self.gpa,
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// CRUD operations a storage backend provides.
pub trait RecordStore {
    /// Stores a new student and returns it with its assigned id.
    fn create(&mut self, student: NewStudent) -> std::result::Result<Student, StoreError>;

    /// All students in storage order.
    fn get_all(&self) -> &[Student];

    fn get(&self, id: u64) -> Option<&Student>;

    /// Replaces the student with `id`, keeping the id.
    fn update(&mut self, id: u64, student: NewStudent) -> std::result::Result<Student, StoreError>;

    /// Removes and returns the student with `id`.
    fn delete(&mut self, id: u64) -> std::result::Result<Student, StoreError>;
}

/// In-memory [`RecordStore`]. Ids start at 1 and are never reused.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    students: Vec<Student>,
    last_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: u64) -> std::result::Result<usize, StoreError> {
        self.students
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn ensure_unique(&self, number: &str, except: Option<u64>) -> std::result::Result<(), StoreError> {
        let taken = self
            .students
            .iter()
            .any(|s| s.student_number == number && Some(s.id) != except);
        if taken {
            return Err(StoreError::DuplicateStudentNumber(number.to_string()));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn create(&mut self, student: NewStudent) -> std::result::Result<Student, StoreError> {
        self.ensure_unique(&student.student_number, None)?;
        self.last_id += 1;
        let student = student.into_student(self.last_id);
        self.students.push(student.clone());
        Ok(student)
    }

    fn get_all(&self) -> &[Student] {
        &self.students
    }

    fn get(&self, id: u64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    fn update(&mut self, id: u64, student: NewStudent) -> std::result::Result<Student, StoreError> {
        let pos = self.position(id)?;
        self.ensure_unique(&student.student_number, Some(id))?;
        let student = student.into_student(id);
        self.students[pos] = student.clone();
        Ok(student)
    }

    fn delete(&mut self, id: u64) -> std::result::Result<Student, StoreError> {
        let pos = self.position(id)?;
        Ok(self.students.remove(pos))
    }
}

/// Records a search ran over, with the outcome.
///
/// For binary search `data` is the ascending view sorted by the searched key,
/// and `outcome.index` points into it.
#[derive(Debug, Serialize)]
pub struct SearchRun<'a> {
    pub data: Vec<&'a Student>,
    pub outcome: SearchOutcome,
}

impl<'a> SearchRun<'a> {
    /// The matched student, if any.
    pub fn matched(&self) -> Option<&'a Student> {
        self.outcome.index.and_then(|i| self.data.get(i).copied())
    }
}

/// Totals shown on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StudentStats {
    pub total_students: usize,
    /// Mean GPA rounded to two decimals; `0.0` with no students.
    pub average_gpa: f64,
    pub department_counts: BTreeMap<String, usize>,
}

impl StudentStats {
    fn collect(students: &[Student]) -> Self {
        let total_students = students.len();
        let average_gpa = if total_students == 0 {
            0.0
        } else {
            let mean = students.iter().map(|s| s.gpa).sum::<f64>() / total_students as f64;
            (mean * 100.0).round() / 100.0
        };

        let mut department_counts = BTreeMap::new();
        for student in students {
            *department_counts
                .entry(student.department.clone())
                .or_insert(0) += 1;
        }

        Self {
            total_students,
            average_gpa,
            department_counts,
        }
    }
}

/// Validated CRUD plus the sort/search request flows over a [`RecordStore`].
#[derive(Debug)]
pub struct StudentManager<S: RecordStore> {
    store: S,
    config: ManagerConfig,
}

impl StudentManager<MemoryStore> {
    /// Manager over an empty [`MemoryStore`] with default config.
    pub fn in_memory() -> Self {
        Self {
            store: MemoryStore::new(),
            config: ManagerConfig::default(),
        }
    }
}

impl<S: RecordStore> StudentManager<S> {
    /// Builds a manager, rejecting a config that [`ManagerConfig::validate`] flags.
    pub fn new(store: S, config: ManagerConfig) -> Result<Self> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems).into());
        }
        Ok(Self { store, config })
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create(&mut self, student: NewStudent) -> Result<Student> {
        student.validate()?;
        let created = self.store.create(student)?;
        info!(id = created.id, student_number = %created.student_number, "student created");
        Ok(created)
    }

    pub fn get_all(&self) -> &[Student] {
        self.store.get_all()
    }

    pub fn get(&self, id: u64) -> Result<&Student> {
        self.store.get(id).ok_or(Error::Store(StoreError::NotFound(id)))
    }

    pub fn update(&mut self, id: u64, student: NewStudent) -> Result<Student> {
        student.validate()?;
        let updated = self.store.update(id, student)?;
        info!(id, "student updated");
        Ok(updated)
    }

    pub fn delete(&mut self, id: u64) -> Result<Student> {
        let removed = self.store.delete(id)?;
        info!(id, "student deleted");
        Ok(removed)
    }

    /// Sorts all students as requested by a form: `order` is `"asc"` for
    /// ascending, anything else sorts descending.
    pub fn run_sort(&self, algorithm: &str, key: &str, order: &str) -> Result<SortOutcome<'_, Student>> {
        let algorithm: SortAlgorithm = algorithm.parse()?;
        Ok(sort(algorithm, self.get_all(), Some(key), order == "asc"))
    }

    /// Sorts all students with the configured defaults.
    pub fn sort_default(&self) -> SortOutcome<'_, Student> {
        let sort_config = &self.config.sort;
        sort(
            sort_config.algorithm,
            self.get_all(),
            Some(sort_config.key.as_str()),
            sort_config.ascending,
        )
    }

    /// Searches all students for `target` on `key`.
    ///
    /// Binary search runs over the students merge-sorted ascending by `key`.
    /// Numeric fields get the target converted up front when it parses, so
    /// `"3.50"` finds a GPA of 3.5 with every algorithm.
    pub fn run_search(&self, algorithm: &str, key: &str, target: &str) -> Result<SearchRun<'_>> {
        let algorithm: SearchAlgorithm = algorithm.parse()?;
        self.search_with(algorithm, key, target)
    }

    /// [`run_search`](Self::run_search) with the configured search algorithm.
    pub fn search_default(&self, key: &str, target: &str) -> Result<SearchRun<'_>> {
        self.search_with(self.config.search.algorithm, key, target)
    }

    fn search_with(
        &self,
        algorithm: SearchAlgorithm,
        key: &str,
        target: &str,
    ) -> Result<SearchRun<'_>> {
        if target.trim().is_empty() {
            return Err(Error::EmptyTarget);
        }

        let students = self.get_all();
        let target = self.target_for(key, target);

        let data: Vec<&Student> = if algorithm.requires_sorted_input() {
            merge_sort(students, Some(key), true).data
        } else {
            students.iter().collect()
        };

        let outcome = search(algorithm, &data, target, Some(key));
        debug!(%algorithm, key, found = outcome.found, "search request served");
        Ok(SearchRun { data, outcome })
    }

    /// Free-text search over the configured fields, one entry per student.
    pub fn free_text_search(&self, query: &str) -> Vec<&Student> {
        let fields: Vec<&str> = self.config.search.fields.iter().map(String::as_str).collect();
        fuzzy_contains_any(
            self.get_all(),
            &fields,
            query,
            &self.config.search.identity_field,
        )
    }

    pub fn stats(&self) -> StudentStats {
        StudentStats::collect(self.get_all())
    }

    fn target_for(&self, key: &str, target: &str) -> Value {
        let raw = Value::from(target);
        let sample = self.get_all().first().map(|s| extract_value(s, Some(key)));
        match sample {
            Some(sample) if sample.is_numeric() => coerce_for_search(&sample, &raw).unwrap_or(raw),
            _ => raw,
        }
    }
}
