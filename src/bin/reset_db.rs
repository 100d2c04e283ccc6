//! Drops the notes and settings tables and recreates them from the migrations.

use anyhow::{bail, Context};

use notes_backend::{config::Backend, logging, store::PgStore, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env()?;

    let (url, pool_size) = match &config.backend {
        Backend::Postgres { url, pool_size } => (url, *pool_size),
        Backend::Memory => bail!("DATABASE_URL=memory has no tables to reset"),
    };

    let store = PgStore::connect(url, pool_size)
        .await
        .context("failed to connect to the database")?;
    store.reset().await.context("failed to reset the database")?;

    tracing::info!("database tables dropped and recreated");
    Ok(())
}
