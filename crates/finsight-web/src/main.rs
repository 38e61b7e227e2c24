//! finsight web server
//!
//! Run with: cargo run -p finsight-web

use tracing::info;
use tracing_subscriber::EnvFilter;

use finsight_web::{config::Config, llm, router, secrets, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finsight=debug,info")),
        )
        .init();

    info!("Starting finsight {}", env!("CARGO_PKG_VERSION"));

    let config = match Config::load() {
        Ok(c) => {
            info!(locale = %c.ui.locale, model = %c.llm.model, "Configuration loaded");
            c
        }
        Err(e) => {
            tracing::warn!("Could not load finsight.toml: {e}");
            tracing::warn!("Using default configuration");
            Config::default()
        }
    };

    let api_key = secrets::resolve_api_key(&config.llm);
    let backend = llm::build_backend(&config.llm, api_key)?;
    let bind = config.server.bind.clone();
    let app = router::build_router(AppState::new(config, backend));

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
