// Error handling utilities
// Author: Gabriel Demetrios Lafis

use std::error::Error;
use std::fmt;

use crate::processing::QueryError;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Query(QueryError),
    Config(String),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Query(err) => write!(f, "Query error: {}", err),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Query(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Config(_) => None,
        }
    }
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        AppError::Query(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
