use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use article_digest::config_manager::{load_config, locate_config_file};
use article_digest::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = locate_config_file();
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &config_path {
        Some(path) => info!("Loaded configuration from: {}", path.display()),
        None => info!("Using built-in configuration"),
    }
    if config.models.cache_models {
        info!("Model pooling enabled");
    }

    let addr = config.bind_address();
    let app = article_digest::build_app(AppState::new(config));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
