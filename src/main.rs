mod cli;

use std::sync::Arc;

use clap::Parser;
use parking_lot::RwLock;

use cli::Commands;
use typeahead::{
    engine::{Engine, SearchOptions},
    handlers::{Consts, Ctx},
    http, init,
    models::Config,
};

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI flags.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match init::generate_config(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            // Load datasets and print stats.
            Commands::Check => {
                let config = init::init_config(&cli.config);
                let engine = load_engine(&config, &cli.data);
                print_json(&engine.get_stats());
                return;
            }

            // One-off search.
            Commands::Query { q, limit, typo } => {
                let config = init::init_config(&cli.config);
                let engine = load_engine(&config, &cli.data);
                let results = engine.search(
                    &q,
                    SearchOptions {
                        limit,
                        typo_tolerance: typo,
                    },
                );
                print_json(&results);
                return;
            }
        }
    }

    // Load config.
    let config = init::init_config(&cli.config);

    // Build the index.
    let engine = load_engine(&config, &cli.data);

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx {
        engine: Arc::new(RwLock::new(engine)),
        consts: Consts::from(&config),
    });

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = config.app.address;

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

/// Build the engine or exit with an error message.
fn load_engine(config: &Config, data: &[std::path::PathBuf]) -> Engine {
    init::init_engine(config, data).unwrap_or_else(|e| {
        log::error!("error loading engine: {}", e);
        std::process::exit(1);
    })
}

fn print_json<T: serde::Serialize>(v: &T) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            log::error!("error encoding output: {}", e);
            std::process::exit(1);
        }
    }
}
