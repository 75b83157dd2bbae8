// Query engine over the shared participant table
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use serde::Serialize;

use crate::data::{Column, Participant, Table, TableHandle};
use crate::utils::validate_range;
use super::{
    group_mean, score_values, summarize, value_counts, CodeMaps, Criterion, FilterSet, GroupMean,
    QueryError, QueryResult, Summary, ValueCount,
};

/// Rows returned by the sample operations
pub const SAMPLE_SIZE: usize = 5;

/// Page size of a search when the caller gives none
pub const DEFAULT_LIMIT: usize = 10;

/// Largest page a search may request unless configured otherwise
pub const DEFAULT_MAX_LIMIT: usize = 1000;

/// Optional criteria of a participant search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub state: Option<String>,
    /// Race/ethnicity label, e.g. `BRANCA`
    pub race: Option<String>,
    /// School type label, e.g. `PRIVADA`
    pub school_type: Option<String>,
    pub math_min: Option<f64>,
    pub math_max: Option<f64>,
}

impl SearchCriteria {
    /// Build the filter set for these criteria.
    ///
    /// Labels missing from the code maps add no criterion.
    pub fn to_filter_set(&self, codes: &CodeMaps) -> FilterSet {
        let mut filters = FilterSet::new();

        if let Some(age) = self.age {
            filters.push(Criterion::equals(Column::Age, age));
        }
        if let Some(sex) = &self.sex {
            filters.push(Criterion::equals(Column::Sex, sex.trim().to_uppercase()));
        }
        if let Some(state) = &self.state {
            filters.push(Criterion::equals(Column::State, state.trim().to_uppercase()));
        }

        for (label, map, column) in [
            (&self.race, &codes.race, Column::Race),
            (&self.school_type, &codes.school_type, Column::SchoolType),
        ] {
            let Some(label) = label else { continue };
            match map.lookup(label) {
                Some(code) => filters.push(Criterion::equals(column, code)),
                None => debug!("Ignoring unknown {} label '{}'", map.name(), label),
            }
        }

        if let Some(min) = self.math_min {
            filters.push(Criterion::at_least(Column::Math, min));
        }
        if let Some(max) = self.math_max {
            filters.push(Criterion::at_most(Column::Math, max));
        }

        filters
    }
}

/// Statistics of one score column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: &'static str,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Availability report of the loaded table
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub available: bool,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

/// Read-only query engine.
///
/// Holds the table handed to it at startup; every operation is a pure
/// function of that table and its arguments, so one engine is shared by all
/// request workers.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    table: Arc<TableHandle>,
    codes: CodeMaps,
    max_limit: usize,
}

impl QueryEngine {
    /// Create a new query engine over a loaded table
    pub fn new(table: Arc<TableHandle>) -> Self {
        QueryEngine {
            table,
            codes: CodeMaps::default(),
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }

    /// Replace the categorical code maps
    pub fn with_codes(mut self, codes: CodeMaps) -> Self {
        self.codes = codes;
        self
    }

    /// Set the largest page a search may request
    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit.max(1);
        self
    }

    pub fn codes(&self) -> &CodeMaps {
        &self.codes
    }

    /// Report whether the table is loaded and how large it is
    pub fn status(&self) -> EngineStatus {
        match self.table.as_ref() {
            TableHandle::Ready(table) => EngineStatus {
                available: true,
                rows: table.len(),
                reason: None,
                metadata: table.metadata.properties.clone(),
            },
            TableHandle::Unavailable { reason } => EngineStatus {
                available: false,
                rows: 0,
                reason: Some(reason.clone()),
                metadata: BTreeMap::new(),
            },
        }
    }

    fn table(&self) -> QueryResult<&Table> {
        match self.table.as_ref() {
            TableHandle::Ready(table) => Ok(table),
            TableHandle::Unavailable { reason } => Err(QueryError::Unavailable(reason.clone())),
        }
    }

    /// First rows of the table, optionally restricted to one exam year
    pub fn general_sample(&self, year: Option<i64>) -> QueryResult<Vec<&Participant>> {
        let table = self.table()?;

        let filters = match year {
            Some(year) => FilterSet::new().and(Criterion::equals(Column::Year, year)),
            None => FilterSet::new(),
        };

        let rows = filters.first(table, SAMPLE_SIZE);
        if rows.is_empty() {
            return Err(QueryError::NotFound(match year {
                Some(year) => format!("no participants for year {}", year),
                None => "dataset has no rows".to_string(),
            }));
        }

        Ok(rows)
    }

    /// First rows whose residence state matches `state`, ignoring case
    pub fn sample_by_state(&self, state: &str) -> QueryResult<Vec<&Participant>> {
        let table = self.table()?;

        let state = state.trim().to_uppercase();
        let rows = FilterSet::new()
            .and(Criterion::equals(Column::State, state.as_str()))
            .first(table, SAMPLE_SIZE);

        if rows.is_empty() {
            return Err(QueryError::NotFound(format!(
                "no participants for state {}",
                state
            )));
        }

        Ok(rows)
    }

    /// Search participants, returning at most `limit` rows in table order
    pub fn search_participants(
        &self,
        criteria: &SearchCriteria,
        limit: Option<usize>,
    ) -> QueryResult<Vec<&Participant>> {
        let table = self.table()?;

        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        validate_range(limit, 1, self.max_limit, "limit").map_err(QueryError::InvalidArgument)?;

        let filters = criteria.to_filter_set(&self.codes);
        debug!("Searching with {} criteria, limit {}", filters.criteria().len(), limit);

        let rows = filters.first(table, limit);
        if rows.is_empty() {
            return Err(QueryError::NotFound(
                "no participants match the given filters".to_string(),
            ));
        }

        Ok(rows)
    }

    /// Mean, median and standard deviation of every score column
    pub fn aggregate_statistics(&self) -> QueryResult<Vec<ColumnSummary>> {
        let table = self.table()?;

        Column::SCORES
            .iter()
            .map(|&column| {
                let summary = summarize(&score_values(table, column))
                    .ok_or_else(|| QueryError::NotFound("dataset has no rows".to_string()))?;

                Ok(ColumnSummary {
                    column: column.name(),
                    summary,
                })
            })
            .collect()
    }

    /// Row count per distinct value of the named column
    pub fn demographic_distribution(&self, column: &str) -> QueryResult<Vec<ValueCount>> {
        let table = self.table()?;

        let column = Column::from_name(column).ok_or_else(|| {
            QueryError::InvalidArgument(format!("unknown column '{}'", column))
        })?;

        Ok(value_counts(table, column))
    }

    /// Mean math score per residence state, highest first
    pub fn ranking_by_state(&self) -> QueryResult<Vec<GroupMean>> {
        let table = self.table()?;
        Ok(group_mean(table, Column::State, Column::Math))
    }
}
