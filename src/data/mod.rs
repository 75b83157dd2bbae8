// Data module for the participant table and its loader
// Author: Gabriel Demetrios Lafis

mod csv;
mod loader;
mod schema;

pub use self::csv::*;
pub use loader::*;
pub use schema::*;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Represents a source the participant table can be read from
pub trait DataSource {
    /// Read the whole source into a cleaned table
    fn read(&self) -> Result<Table, DataError>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// The cleaned, immutable participant table
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: Vec<Participant>,
    pub metadata: Metadata,
}

impl Table {
    /// Create a table from already cleaned rows
    pub fn new(rows: Vec<Participant>) -> Self {
        Table {
            rows,
            metadata: Metadata::new(),
        }
    }

    /// Get the number of rows in the table
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in their original order
    pub fn rows(&self) -> &[Participant] {
        &self.rows
    }

    /// Iterate over the rows in their original order
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.rows.iter()
    }
}

impl FromIterator<Participant> for Table {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

/// Lifecycle state of the process-wide table.
///
/// Built once at startup and never mutated afterwards. `Unavailable` is kept
/// apart from a `Ready` table with zero rows so queries can tell "not loaded"
/// from "no matches".
#[derive(Debug, Clone)]
pub enum TableHandle {
    Ready(Table),
    Unavailable { reason: String },
}

impl TableHandle {
    /// Mark the table as unavailable
    pub fn unavailable(reason: impl Into<String>) -> Self {
        TableHandle::Unavailable { reason: reason.into() }
    }

    /// The loaded table, if any
    pub fn table(&self) -> Option<&Table> {
        match self {
            TableHandle::Ready(table) => Some(table),
            TableHandle::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, TableHandle::Ready(_))
    }
}

impl From<Table> for TableHandle {
    fn from(table: Table) -> Self {
        TableHandle::Ready(table)
    }
}

/// A dynamically typed cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Numeric view of the value, integers widened to floats
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<Option<i64>> for Value {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Value::Null, Value::Integer)
    }
}

impl From<Option<&String>> for Value {
    fn from(value: Option<&String>) -> Self {
        value.map_or(Value::Null, |s| Value::String(s.clone()))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

/// Load metadata attached to a table
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metadata {
    pub properties: BTreeMap<String, String>,
}

impl Metadata {
    /// Create new empty metadata
    pub fn new() -> Self {
        Metadata {
            properties: BTreeMap::new(),
        }
    }

    /// Add a property to the metadata
    pub fn add(&mut self, key: impl Into<String>, value: impl ToString) {
        self.properties.insert(key.into(), value.to_string());
    }

    /// Get a property from the metadata
    pub fn get(&self, key: &str) -> Option<&String> {
        self.properties.get(key)
    }
}

/// Represents an error while reading a data source
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
