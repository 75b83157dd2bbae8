// Processing module: filters, statistics and the query engine
// Author: Gabriel Demetrios Lafis

mod aggregate;
mod codes;
mod engine;
mod filter;
mod stats;

pub use aggregate::*;
pub use codes::*;
pub use engine::*;
pub use filter::*;
pub use stats::*;

use thiserror::Error;

/// Represents an error returned by a query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The table was never loaded
    #[error("dataset not loaded: {0}")]
    Unavailable(String),

    /// A well-formed query matched nothing
    #[error("not found: {0}")]
    NotFound(String),

    /// A parameter is invalid for the operation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl QueryError {
    /// True for both "not loaded" and "no matches"
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryError::Unavailable(_) | QueryError::NotFound(_))
    }
}

/// Result type alias for queries
pub type QueryResult<T> = Result<T, QueryError>;
