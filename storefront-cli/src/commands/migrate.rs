//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::{create_pool, DbConfig};
use storefront_server::db::migrations;

use super::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Drop every table first (destroys all data)
    #[arg(long)]
    pub reset: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&DbConfig::from(args.db))
        .await
        .context("Failed to create database pool")?;

    if args.reset {
        tracing::warn!("Dropping and recreating all tables");
        migrations::reset(&pool)
            .await
            .context("Failed to reset schema")?;
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    tracing::info!("Schema is up to date");
    Ok(())
}
