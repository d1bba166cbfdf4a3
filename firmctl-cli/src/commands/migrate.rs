//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use firmctl_server::db::{create_pool, schema};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

/// Create the companies schema if it is missing
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = super::require_database_url(args.database_url)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    schema::run(&pool)
        .await
        .context("Failed to bootstrap schema")?;

    pool.close().await;
    Ok(())
}
