use std::sync::Arc;

use pharmacy::{backend::HttpBackend, Config};

mod app;
mod page;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env();
    tracing::info!("Using medicines API at {}", config.api_url);

    let backend = Arc::new(HttpBackend::new(config.api_url.clone()));
    let state = app::AppState::new(&config, backend.clone(), backend);

    if state.catalog.refresh().await.is_err() {
        tracing::warn!("Starting with an empty medicine list");
    }

    let app = app::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Order desk listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
