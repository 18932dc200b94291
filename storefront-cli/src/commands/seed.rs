//! Sample data command
//!
//! Recreates the schema and loads the sample catalogue.

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::db::migrations;
use storefront_server::seed::seed;
use storefront_server::{create_pool, DbConfig, PgStore};

use super::DbArgs;

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = create_pool(&DbConfig::from(args.db))
        .await
        .context("Failed to create database pool")?;

    migrations::reset(&pool)
        .await
        .context("Failed to reset schema")?;

    let store = PgStore::new(pool);
    let summary = seed(&store).await.context("Failed to seed database")?;

    println!(
        "Seeded {} categories, {} tags, {} products ({} tag links)",
        summary.categories, summary.tags, summary.products, summary.product_tags
    );
    Ok(())
}
