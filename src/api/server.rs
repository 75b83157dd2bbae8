// API server implementation
// Author: Gabriel Demetrios Lafis

use actix_cors::Cors;
use actix_web::middleware::{Condition, Logger};
use actix_web::{web, App, HttpServer};
use log::info;

use crate::processing::QueryEngine;
use super::{handlers, routes};

/// API server configuration
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            enable_cors: false,
        }
    }
}

/// API server
pub struct Server {
    config: ServerConfig,
    engine: web::Data<QueryEngine>,
}

impl Server {
    /// Create a new API server around a query engine
    pub fn new(engine: QueryEngine, config: ServerConfig) -> Self {
        Server {
            config,
            engine: web::Data::new(engine),
        }
    }

    /// Run the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let engine = self.engine.clone();
        let enable_cors = self.config.enable_cors;

        info!(
            "Starting server at http://{}:{} with {} workers",
            self.config.host, self.config.port, self.config.workers
        );

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .app_data(engine.clone())
                .wrap(Condition::new(enable_cors, cors))
                .wrap(Logger::default())
                .configure(routes::configure)
                .default_service(web::to(handlers::not_found))
        })
        .workers(self.config.workers)
        .bind((self.config.host.as_str(), self.config.port))?
        .run()
        .await
    }
}
