use anyhow::Context;
use tokio::net::TcpListener;

use notes_backend::{build_router, logging, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;

    let state = AppState::open(&config.backend)
        .await
        .context("failed to open the note store")?;

    let app = build_router(state, config.static_dir.as_deref());

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
