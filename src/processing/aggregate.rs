// Aggregate operations: value frequencies and grouped means
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use serde::Serialize;

use crate::data::{Column, Table, Value};

/// Label of missing values in response bodies
pub const MISSING_LABEL: &str = "null";

/// Number of rows holding one distinct value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    /// Text form of the value; `None` counts the rows where it is missing
    pub value: Option<String>,
    pub count: usize,
}

impl ValueCount {
    pub fn label(&self) -> &str {
        self.value.as_deref().unwrap_or(MISSING_LABEL)
    }
}

/// Mean of a numeric column within one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    pub count: usize,
}

/// Grouping key of a cell, `None` when missing. Floats keep their decimal
/// point, e.g. `700.0`.
fn group_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Float(f) => Some(format!("{:?}", f)),
        other => Some(other.to_string()),
    }
}

/// Running state of an average
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn update(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finalize(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Count rows per distinct value of a column.
///
/// Sorted by descending count; equal counts keep the order in which the
/// values first appear in the table. Missing values get their own entry,
/// distinct from any cell whose text happens to read `null`.
pub fn value_counts(table: &Table, column: Column) -> Vec<ValueCount> {
    let mut positions: HashMap<Option<String>, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for row in table.iter() {
        let key = group_key(&row.value(column));

        match positions.get(&key) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push(ValueCount { value: key, count: 1 });
            }
        }
    }

    // stable: ties stay in first-appearance order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Mean of `value_column` per distinct value of `group_column`.
///
/// Rows with a missing group or a non-numeric value are skipped, so every
/// emitted group has at least one row. Sorted by descending mean; ties keep
/// first-appearance order.
pub fn group_mean(table: &Table, group_column: Column, value_column: Column) -> Vec<GroupMean> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, MeanAccumulator)> = Vec::new();

    for row in table.iter() {
        let Some(key) = group_key(&row.value(group_column)) else {
            continue;
        };
        let Some(value) = row.value(value_column).as_f64() else {
            continue;
        };

        let index = match positions.get(&key) {
            Some(&i) => i,
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, MeanAccumulator::default()));
                groups.len() - 1
            }
        };
        groups[index].1.update(value);
    }

    let mut result: Vec<GroupMean> = groups
        .into_iter()
        .map(|(group, acc)| GroupMean {
            group,
            mean: acc.finalize(),
            count: acc.count,
        })
        .collect();

    result.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    result
}
