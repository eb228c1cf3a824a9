mod auth;
mod config;
mod db;
mod errors;
mod ingest;
mod models;
mod notify;
mod parser;
mod profile;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testutil;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::notify::HttpProfileNotifier;
use crate::parser::HttpResumeParser;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::{PgProfileStore, PgUserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply migrations
    let pool = create_pool(&config.database_url).await?;

    // External collaborators: parsing service and downstream ML consumer
    let parser = HttpResumeParser::new(config.parser_url.clone());
    info!("Parser client initialized ({})", config.parser_url);

    let notifier = HttpProfileNotifier::new(config.notify_url.clone());
    info!("Downstream notifier initialized ({})", config.notify_url);

    // Build app state
    let state = AppState {
        users: Arc::new(PgUserStore::new(pool.clone())),
        profiles: Arc::new(PgProfileStore::new(pool)),
        parser: Arc::new(parser),
        notifier: Arc::new(notifier),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
