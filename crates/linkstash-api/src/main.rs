//! linkstash-api server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use linkstash_api::identity::IdentityClient;
use linkstash_api::{router, AppState};
use linkstash_db::{Database, PoolConfig};
use linkstash_preview::HttpPreviewService;

/// Default listen address when LINKSTASH_ADDR is unset.
const DEFAULT_ADDR: &str = "0.0.0.0:3001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect_with_config(&database_url, PoolConfig::from_env())
        .await
        .context("failed to connect to database")?;
    db.migrate().await.context("failed to run migrations")?;

    let previews = HttpPreviewService::new().context("failed to build preview service")?;
    let identity = IdentityClient::from_env().context("failed to configure identity client")?;

    let state = AppState::new(
        Arc::new(db.links.clone()),
        Arc::new(identity),
        Arc::new(previews),
    );
    let app = router(state);

    let addr: SocketAddr = std::env::var("LINKSTASH_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()
        .context("invalid LINKSTASH_ADDR")?;

    info!(subsystem = "api", %addr, "linkstash API listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}
