use std::sync::Arc;

use eyre::{Result, WrapErr};
use log::{info, warn};

mod cli;

use clap::Parser;
use cli::Cli;
use sift::config::Config;
use sift::scrape::Scraper;
use sift::server::{AppState, cors_layer, router};
use sift::youtube::YouTube;

fn setup_logging(config: &Config, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(log_file) = &config.log_file {
        if let Some(dir) = log_file.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(log_file)?);
        builder.target(env_logger::Target::Pipe(target));
    }

    builder.init();
    Ok(())
}

/// An explicit --config must load; the default location falls back to defaults
fn load_config(cli: &Cli) -> Result<(Config, Option<eyre::Report>)> {
    match &cli.config {
        Some(path) => Ok((Config::load_from(path)?, None)),
        None => match Config::load() {
            Ok(config) => Ok((config, None)),
            Err(e) => Ok((Config::default(), Some(e))),
        },
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_err) = load_config(&cli)?;
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    setup_logging(&config, cli.verbose)?;
    if let Some(e) = config_err {
        warn!("Ignoring config file {}: {e:#}", sift::config::config_path().display());
    }

    let scraper = Scraper::new(config.fetch_config())?;
    let provider = Arc::new(YouTube::new(config.provider_timeout_secs)?);
    let state = AppState::new(&config, scraper, provider);
    let app = router(state).layer(cors_layer(&config.cors_origins));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;
    info!("{} listening on {addr}", sift::server::SERVICE_NAME);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
