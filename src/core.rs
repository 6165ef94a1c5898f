//! Core traits and types for rowsort.
//!
//! This module defines:
//! - [`Value`]: The comparable form of a record field.
//! - [`FieldAccessor`]: The main trait users implement to sort and search their record types.
//! - [`extract_value`]: Field lookup with the record-itself fallback.
//! - SortEntry: Internal index/key pair the sorting algorithms permute.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A field value extracted from a record.
///
/// Integers and floats compare with each other numerically, text compares
/// case-insensitively. See [`crate::compare`] for the full policy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns `true` for [`Value::Int`] and [`Value::Float`].
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

// Floats always keep a fractional part or exponent ("3.0", "1e20"), so a float
// field never renders the same as an integer one.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {$(
        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        }
    )*};
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Text(n.to_string()), Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            // Arrays and objects compare by their JSON text.
            other => Value::Text(other.to_string()),
        }
    }
}

/// A trait for reading comparable values out of a record without copying the record.
///
/// This trait allows `rowsort` to sort and search any record representation:
/// plain structs, mapping-like records (`HashMap`, `BTreeMap`, JSON objects) or
/// bare primitives.
///
/// # Examples
///
/// Implementing for a custom struct:
///
/// ```
/// use rowsort::core::{FieldAccessor, Value};
///
/// struct Book {
///     title: String,
///     pages: u32,
/// }
///
/// impl FieldAccessor for Book {
///     fn get_field(&self, key: &str) -> Option<Value> {
///         match key {
///             "title" => Some(Value::from(self.title.as_str())),
///             "pages" => Some(Value::from(self.pages)),
///             _ => None,
///         }
///     }
///
///     fn to_value(&self) -> Value {
///         Value::from(self.title.as_str())
///     }
/// }
/// ```
pub trait FieldAccessor {
    /// Returns the value of the named field, or `None` if the record has no such field.
    fn get_field(&self, key: &str) -> Option<Value>;

    /// Returns the record itself as a comparable value.
    ///
    /// Used when no field key is given and when the requested field is absent.
    fn to_value(&self) -> Value;
}

/// Extracts the comparable value of `key` from `record`.
///
/// With no key the record itself is the value. A missing field also falls back
/// to the record itself, so heterogeneous inputs never fail.
///
/// ```
/// use rowsort::core::{extract_value, Value};
/// use std::collections::HashMap;
///
/// let row = HashMap::from([("id".to_string(), Value::from("7"))]);
/// assert_eq!(extract_value(&row, Some("id")), Value::from("7"));
/// assert_eq!(extract_value(&42, None), Value::Int(42));
/// ```
pub fn extract_value<R: FieldAccessor + ?Sized>(record: &R, key: Option<&str>) -> Value {
    match key {
        None => record.to_value(),
        Some(key) => record.get_field(key).unwrap_or_else(|| record.to_value()),
    }
}

/// A record position paired with its normalized sort key.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SortEntry {
    pub index: usize,
    pub key: Value,
}

// References forward to the record, so `&[&T]` views sort and search like `&[T]`.
impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn get_field(&self, key: &str) -> Option<Value> {
        (**self).get_field(key)
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl FieldAccessor for Value {
    fn get_field(&self, _key: &str) -> Option<Value> {
        None
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FieldAccessor for str {
    fn get_field(&self, _key: &str) -> Option<Value> {
        None
    }

    fn to_value(&self) -> Value {
        Value::from(self)
    }
}

impl FieldAccessor for String {
    fn get_field(&self, _key: &str) -> Option<Value> {
        None
    }

    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }
}

macro_rules! primitive_accessor {
    ($($t:ty),*) => {$(
        impl FieldAccessor for $t {
            fn get_field(&self, _key: &str) -> Option<Value> {
                None
            }

            fn to_value(&self) -> Value {
                Value::from(*self)
            }
        }
    )*};
}

primitive_accessor!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool);

// Mapping-like records: look the key up, render the whole mapping as text otherwise.
impl<V: Clone + Into<Value>> FieldAccessor for HashMap<String, V> {
    fn get_field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned().map(Into::into)
    }

    fn to_value(&self) -> Value {
        let mut entries: Vec<(&String, &V)> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        Value::Text(mapping_text(entries))
    }
}

impl<V: Clone + Into<Value>> FieldAccessor for BTreeMap<String, V> {
    fn get_field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned().map(Into::into)
    }

    fn to_value(&self) -> Value {
        Value::Text(mapping_text(self.iter()))
    }
}

impl FieldAccessor for serde_json::Value {
    fn get_field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned().map(Value::from)
    }

    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

fn mapping_text<'a, V, I>(entries: I) -> String
where
    V: Clone + Into<Value> + 'a,
    I: IntoIterator<Item = (&'a String, &'a V)>,
{
    let body: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{k}: {}", v.clone().into()))
        .collect();
    format!("{{{}}}", body.join(", "))
}
