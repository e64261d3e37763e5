use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;

mod app;
mod config;
mod error_mapper;
mod event;
mod page;
mod query;
mod setup;
mod ui;

use config::app_config::{AppConfig, ConfigOverrides};
use config::storage_config::init_storage;
use setup::dependency_injection::DependencyContainer;

#[derive(Parser, Debug)]
#[command(name = "catalog-ui")]
#[command(about = "Manage a local product catalog from the terminal")]
#[command(version)]
struct Args {
    /// Directory holding the catalog slot files (overrides CATALOG_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Keep the catalog in memory for this session only
    #[arg(short, long)]
    memory: bool,

    /// Storage slot holding the products (overrides CATALOG_STORAGE_KEY)
    #[arg(short = 'k', long)]
    storage_key: Option<String>,
}

/// Terminal UI Entry Point
///
/// - config/: environment and command line configuration
/// - setup/: dependency injection
/// - page/: products page view-model
/// - ui/: rendering
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = AppConfig::from_env().with_overrides(ConfigOverrides {
        data_dir: args.data_dir,
        in_memory: args.memory,
        storage_key: args.storage_key,
    });

    // 3. Initialize tracing; the guard flushes the log file on exit
    let _log_guard = config.logging.init_tracing()?;

    // 4. Initialize storage
    let storage = init_storage(&config.storage).await?;
    tracing::info!(
        backend = ?config.storage.backend(),
        key = %config.storage.products_key,
        "storage ready"
    );

    // 5. Wire dependencies
    let container = DependencyContainer::new(storage, &config.storage.products_key);

    // 6. Run the page
    app::App::new(container).run().await?;

    Ok(())
}
