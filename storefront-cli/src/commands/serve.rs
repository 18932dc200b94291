//! HTTP server command
//!
//! Serves the catalogue API from Postgres, or from an in-memory store
//! preloaded with the sample catalogue when `--memory` is given.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::db::migrations;
use storefront_server::seed::seed;
use storefront_server::{
    create_pool, run_server, DbConfig, MemoryStore, PgStore, ServerConfig, Store,
};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "STOREFRONT_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Serve from an in-memory store seeded with sample data instead of Postgres
    #[arg(long)]
    pub memory: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn Store> = if args.memory {
        let store = MemoryStore::new();
        seed(&store).await.context("Failed to seed in-memory store")?;
        tracing::warn!("Using in-memory store; data is lost on shutdown");
        Arc::new(store)
    } else {
        let pool = create_pool(&DbConfig::from(args.db))
            .await
            .context("Failed to create database pool")?;
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
        Arc::new(PgStore::new(pool))
    };

    tracing::info!("Starting storefront server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
