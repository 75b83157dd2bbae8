// ENEM Microdata API - Main executable
// Author: Gabriel Demetrios Lafis

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::{App, Arg};
use log::{info, warn};

use enem_microdata_api::{
    api::{statistics_body, Server, ServerConfig},
    data::load,
    processing::QueryEngine,
    utils::{init_logging, AppResult, Config},
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = App::new("ENEM Microdata API")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Query service over ENEM exam microdata")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .value_name("CSV")
                .help("Overrides the dataset path")
                .takes_value(true),
        )
        .subcommand(
            App::new("server")
                .about("Run the API server")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Sets the server host")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Sets the server port")
                        .takes_value(true),
                ),
        )
        .subcommand(App::new("inspect").about("Load the dataset and print its statistics"))
        .get_matches();

    // Load configuration
    let mut config = match matches.value_of("config") {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading config file {}", path))?,
        None => Config::default(),
    };

    if let Some(dataset) = matches.value_of("dataset") {
        config.dataset.path = dataset.to_string();
    }

    // Initialize logging
    if let Err(err) = init_logging(
        config.log_level_filter(),
        config.logging.file.as_deref().map(Path::new),
    ) {
        eprintln!("Error initializing logger: {}", err);
    }

    match matches.subcommand() {
        Some(("server", sub)) => {
            // Override config with command line arguments
            let host = sub.value_of("host").unwrap_or(&config.server.host).to_string();
            let port = match sub.value_of("port") {
                Some(port) => port
                    .parse::<u16>()
                    .with_context(|| format!("invalid port '{}'", port))?,
                None => config.server.port,
            };

            let server_config = ServerConfig {
                host,
                port,
                workers: config.server.workers.unwrap_or_else(num_cpus::get),
                enable_cors: config.server.enable_cors,
            };

            Server::new(build_engine(&config), server_config)
                .run()
                .await
                .context("running API server")?;
        }
        Some(("inspect", _)) => inspect(&build_engine(&config))?,
        _ => println!("No subcommand specified. Use --help for usage information."),
    }

    Ok(())
}

/// Load the dataset once, before any query is served
fn build_engine(config: &Config) -> QueryEngine {
    let table = load(&config.dataset.path, &config.csv_options());
    if !table.is_available() {
        warn!("Serving without data: every query will report the dataset as not loaded");
    }

    QueryEngine::new(Arc::new(table)).with_max_limit(config.query.max_limit)
}

/// Print dataset status and score statistics as JSON
fn inspect(engine: &QueryEngine) -> AppResult<()> {
    let status = engine.status();
    info!("Dataset available: {}, rows: {}", status.available, status.rows);

    let statistics = statistics_body(&engine.aggregate_statistics()?);
    let report = serde_json::json!({
        "dataset": status,
        "statistics": statistics,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?
    );
    Ok(())
}
