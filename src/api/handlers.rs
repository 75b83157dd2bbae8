// API request handlers
// Author: Gabriel Demetrios Lafis

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use log::debug;
use serde_json::json;

use crate::processing::QueryEngine;
use super::{models::*, ApiError};

/// Welcome message
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Bem-vindo à API de Microdados Enem! Consulte /api/v1 para os dados.",
    }))
}

/// Service and dataset status
pub async fn health_check(engine: web::Data<QueryEngine>) -> impl Responder {
    let status = engine.status();

    HttpResponse::Ok().json(json!({
        "status": if status.available { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "dataset": status,
    }))
}

/// First records, optionally for one exam year
pub async fn general_data(
    engine: web::Data<QueryEngine>,
    query: web::Query<GeneralDataQuery>,
) -> Result<impl Responder, ApiError> {
    let rows = engine.general_sample(query.ano)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// First records of one state of residence
pub async fn data_by_state(
    engine: web::Data<QueryEngine>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let state = path.into_inner();
    let rows = engine.sample_by_state(&state)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Filtered participant search
pub async fn search_participants(
    engine: web::Data<QueryEngine>,
    query: web::Query<SearchQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();
    debug!("Participant search: {:?}", query);

    let rows = engine.search_participants(&query.criteria(), query.limite)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Score statistics over the whole dataset
pub async fn statistics(engine: web::Data<QueryEngine>) -> Result<impl Responder, ApiError> {
    let summaries = engine.aggregate_statistics()?;
    Ok(HttpResponse::Ok().json(statistics_body(&summaries)))
}

/// Value frequencies of one column
pub async fn distribution(
    engine: web::Data<QueryEngine>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let column = path.into_inner();
    let counts = engine.demographic_distribution(&column)?;
    Ok(HttpResponse::Ok().json(distribution_body(&counts)))
}

/// Mean math score per state
pub async fn state_ranking(engine: web::Data<QueryEngine>) -> Result<impl Responder, ApiError> {
    let ranking = engine.ranking_by_state()?;
    Ok(HttpResponse::Ok().json(ranking_body(&ranking)))
}

/// Fallback for unknown routes
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NotFound(format!("no route for {}", req.path())))
}
