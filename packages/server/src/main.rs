use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::load()?;
    let address = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config);
    let app = server::build_router(state);

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");
    axum::serve(listener, app).await?;

    Ok(())
}
