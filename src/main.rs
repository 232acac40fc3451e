use anyhow::{Context, Result};
use bubbletea_rs::Program;
use clap::Parser;
use launch_browser::api::HttpLaunchSource;
use launch_browser::app::{self, App};
use launch_browser::config::{self, Cli};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_path())?;

    let settings = cli.settings();
    tracing::info!(api_url = %settings.api_url, page_size = settings.page_size, "starting");

    let source = HttpLaunchSource::from_settings(&settings)
        .with_context(|| format!("invalid API url {}", settings.api_url))?;
    config::install(settings);
    app::install_source(Arc::new(source));

    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
