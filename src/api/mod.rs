// API module for exposing the query engine via HTTP
// Author: Gabriel Demetrios Lafis

mod handlers;
mod models;
mod routes;
mod server;

pub use handlers::*;
pub use models::*;
pub use routes::*;
pub use server::*;

use std::error::Error;
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::processing::QueryError;

/// Represents an error in the API module
#[derive(Debug)]
pub enum ApiError {
    QueryError(QueryError),
    ValidationError(String),
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::QueryError(err) => write!(f, "{}", err),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl Error for ApiError {}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::QueryError(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::QueryError(QueryError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            ApiError::QueryError(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string(),
        }))
    }
}
