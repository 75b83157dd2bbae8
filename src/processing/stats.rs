// Statistical operations over score columns
// Author: Gabriel Demetrios Lafis

use serde::Serialize;

use crate::data::{Column, Table};

/// Summary statistics of one numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two values
    #[serde(rename = "std")]
    pub std_dev: Option<f64>,
}

/// Summarize values, `None` when there are none
pub fn summarize(values: &[f64]) -> Option<Summary> {
    Some(Summary {
        mean: compute_mean(values)?,
        median: compute_median(values)?,
        std_dev: compute_std_dev(values),
    })
}

/// Collect a score column of the table in row order
pub fn score_values(table: &Table, column: Column) -> Vec<f64> {
    table
        .iter()
        .filter_map(|row| row.scores.get(column))
        .collect()
}

/// Compute mean of values
pub fn compute_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Compute median of values
pub fn compute_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Compute the sample standard deviation (n - 1 denominator)
pub fn compute_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let mean = compute_mean(values)?;
    let variance = values.iter()
        .map(|&x| (x - mean).powi(2))
        .sum::<f64>() / (values.len() - 1) as f64;

    Some(variance.sqrt())
}
