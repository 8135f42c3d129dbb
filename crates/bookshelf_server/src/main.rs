//! Server entry point.
//!
//! Usage: `bookshelf_server [config.json]`

use bookshelf_core::{init_logging, CatalogStore};
use bookshelf_server::config::DEFAULT_CONFIG_PATH;
use bookshelf_server::{serve, ServerConfig, ServerError};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bookshelf_server: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ServerConfig::load(&config_path)?;
    init_logging(&config.log_level, &config.log_dir)?;

    let store = CatalogStore::open(&config.database_path)?;
    info!(
        "event=catalog_open module=server status=ok version={}",
        bookshelf_core::core_version()
    );

    serve(&config, store).await
}
