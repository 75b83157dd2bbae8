// API server example
// Author: Gabriel Demetrios Lafis

use std::env;
use std::sync::Arc;

use enem_microdata_api::{
    api::{Server, ServerConfig},
    data::{load, CsvOptions},
    processing::QueryEngine,
    utils::init_logging,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    if let Err(err) = init_logging(log::LevelFilter::Info, None) {
        eprintln!("Error initializing logger: {}", err);
    }

    // Load the dataset given on the command line
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "data/microdados_enem.csv".to_string());
    let table = load(&path, &CsvOptions::default());
    let engine = QueryEngine::new(Arc::new(table));

    // Create server config
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 8080,
        workers: num_cpus::get(),
        enable_cors: true,
    };

    // Create and run server
    println!("Starting API server at http://{}:{}", config.host, config.port);
    println!("Press Ctrl+C to stop");

    let server = Server::new(engine, config);
    server.run().await
}
