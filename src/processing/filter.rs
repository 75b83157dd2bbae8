// Filter criteria over participant rows
// Author: Gabriel Demetrios Lafis

use std::cmp::Ordering;

use crate::data::{Column, Participant, Table, Value};

/// Comparison applied by a criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    GreaterOrEqual,
    LessOrEqual,
}

/// A single (column, operator, value) filter
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub column: Column,
    pub operator: Operator,
    pub value: Value,
}

impl Criterion {
    pub fn new(column: Column, operator: Operator, value: Value) -> Self {
        Criterion {
            column,
            operator,
            value,
        }
    }

    /// Keep rows where a column equals a value
    pub fn equals(column: Column, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::Equals, value.into())
    }

    /// Keep rows where a column is at least a value
    pub fn at_least(column: Column, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::GreaterOrEqual, value.into())
    }

    /// Keep rows where a column is at most a value
    pub fn at_most(column: Column, value: impl Into<Value>) -> Self {
        Self::new(column, Operator::LessOrEqual, value.into())
    }

    /// Check a row against the criterion. Missing values never match.
    pub fn matches(&self, row: &Participant) -> bool {
        let ordering = match compare(&row.value(self.column), &self.value) {
            Some(ordering) => ordering,
            None => return false,
        };

        match self.operator {
            Operator::Equals => ordering == Ordering::Equal,
            Operator::GreaterOrEqual => ordering != Ordering::Less,
            Operator::LessOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// Compare two values of compatible types; integers and floats compare numerically
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Null, _) | (_, Value::Null) => None,
        (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Conjunction of criteria; a row matches iff every criterion matches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    criteria: Vec<Criterion>,
}

impl FilterSet {
    /// Create an empty filter set that matches every row
    pub fn new() -> Self {
        FilterSet {
            criteria: Vec::new(),
        }
    }

    /// Add a criterion to the conjunction
    pub fn and(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn push(&mut self, criterion: Criterion) {
        self.criteria.push(criterion);
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, row: &Participant) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(row))
    }

    /// Matching rows in table order
    pub fn apply<'t>(&'t self, table: &'t Table) -> impl Iterator<Item = &'t Participant> + 't {
        table.iter().filter(move |row| self.matches(row))
    }

    /// The first `limit` matching rows in table order
    pub fn first<'t>(&self, table: &'t Table, limit: usize) -> Vec<&'t Participant> {
        table
            .iter()
            .filter(|row| self.matches(row))
            .take(limit)
            .collect()
    }
}

impl FromIterator<Criterion> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        FilterSet {
            criteria: iter.into_iter().collect(),
        }
    }
}
