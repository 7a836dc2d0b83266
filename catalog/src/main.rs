//! Library Catalog - interactive console

use anyhow::Context;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_catalog::{
    application::CatalogService,
    config::AppConfig,
    console::{ConsolePrompt, Menu},
    infrastructure::UuidIdGenerator,
};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing; the menu owns stdout
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_catalog={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!("Starting library catalog v{}", env!("CARGO_PKG_VERSION"));

    let id_format = config
        .identifiers
        .id_format()
        .context("Invalid identifier configuration")?;
    let service = CatalogService::new(UuidIdGenerator::new()).with_id_lengths(
        id_format,
        config.identifiers.serial_length,
        config.identifiers.card_length,
    );

    let prompt = ConsolePrompt::new(io::stdin().lock(), io::stdout().lock());
    let mut menu = Menu::new(service, prompt);
    menu.run().context("Console I/O failed")?;

    tracing::info!("Library catalog stopped");
    Ok(())
}
