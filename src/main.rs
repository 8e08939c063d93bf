use std::{env, net::SocketAddr, sync::Arc};
use streak_lab::clock::SystemClock;
use streak_lab::config::ExperimentConfig;
use streak_lab::engine::StreakEngine;
use streak_lab::{AppState, FileStore, resolve_data_dir, router};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ExperimentConfig::from_env();
    let data_dir = resolve_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let clock = Arc::new(SystemClock);
    let store = Box::new(FileStore::new(data_dir));
    let engine = StreakEngine::initialize(config, clock.as_ref(), store);

    let state = AppState::new(engine, clock);
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
    }
}
