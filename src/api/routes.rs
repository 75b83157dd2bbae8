// API routes configuration
// Author: Gabriel Demetrios Lafis

use actix_web::web;

use super::{handlers, ApiError};

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::ValidationError(err.to_string()).into()
    }))
    .route("/", web::get().to(handlers::home))
    .service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(handlers::health_check))

            // Samples
            .route("/dados_gerais", web::get().to(handlers::general_data))
            .route("/dados_por_estado/{estado}", web::get().to(handlers::data_by_state))

            // Queries
            .route("/participantes", web::get().to(handlers::search_participants))
            .route("/estatisticas", web::get().to(handlers::statistics))
            .route("/distribuicao/{coluna}", web::get().to(handlers::distribution))
            .route("/ranking_estados", web::get().to(handlers::state_ranking))
    );
}
