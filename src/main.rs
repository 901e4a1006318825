//! Library Console - interactive desk for librarians

use anyhow::Context;
use tokio::io::BufReader;

use library_console::{
    config::AppConfig,
    console::{ConsoleApp, ConsoleIo},
    logging,
    repository::Repository,
    services::Services,
    store::DataStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    let _guard = logging::init(&config.logging).context("Failed to initialize logging")?;

    tracing::info!("Starting Library Console v{}", env!("CARGO_PKG_VERSION"));

    let store = DataStore::load(&config.data.dir)
        .await
        .with_context(|| format!("Failed to load data from {}", config.data.dir.display()))?;

    // Create repository and services
    let repository = Repository::new(store.into_shared());
    let services = Services::new(repository.clone(), &config);

    let app = ConsoleApp::new(repository, services, config.console.clone());
    let mut io = ConsoleIo::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    app.run(&mut io).await?;

    Ok(())
}
