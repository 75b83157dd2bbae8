// ENEM Microdata API
// Author: Gabriel Demetrios Lafis

//! # ENEM Microdata API
//!
//! An in-memory query engine and REST API over the ENEM exam microdata.
//!
//! ## Features
//!
//! - One-shot CSV loading with numeric coercion of the score columns
//! - Conjunctive filters with equality, range and categorical-label criteria
//! - Score statistics, value frequencies and state rankings
//! - REST API for remote access
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use enem_microdata_api::{
//!     data::{load, CsvOptions},
//!     processing::{QueryEngine, SearchCriteria},
//! };
//!
//! // Load the dataset once
//! let table = load("data/microdados_enem.csv", &CsvOptions::default());
//! let engine = QueryEngine::new(Arc::new(table));
//!
//! // Search participants from private schools in São Paulo
//! let criteria = SearchCriteria {
//!     state: Some("sp".to_string()),
//!     school_type: Some("privada".to_string()),
//!     ..Default::default()
//! };
//!
//! for row in engine.search_participants(&criteria, Some(20)).unwrap() {
//!     println!("{:?} {}", row.registration, row.scores.math);
//! }
//! ```

pub mod api;
pub mod data;
pub mod processing;
pub mod utils;

// Re-export main types
pub use api::Server;
pub use data::{load, Column, Participant, Table, TableHandle, Value};
pub use processing::{QueryEngine, QueryError, SearchCriteria};
pub use utils::Config;
