//! HTTP server command for the companies API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use firmctl_server::db::{create_pool_with_options, schema, ConnectionFactory, PgCompanyStore};
use firmctl_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "FIRMCTL_BIND", default_value = "127.0.0.1:3030")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value = "5")]
    pub max_connections: u32,

    /// Seconds to wait for a free database connection
    #[arg(long, default_value = "5")]
    pub acquire_timeout: u64,

    /// Seconds before a request is aborted
    #[arg(long, default_value = "30")]
    pub request_timeout: u64,

    /// Create missing tables and functions before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = super::require_database_url(args.database_url)?;

    tracing::info!("Starting firmctl server on {}", args.bind);

    let pool = create_pool_with_options(
        &database_url,
        args.max_connections,
        Duration::from_secs(args.acquire_timeout),
    )
    .await
    .context("Failed to create database pool")?;

    if args.migrate {
        schema::run(&pool)
            .await
            .context("Failed to bootstrap schema")?;
    }

    let store = Arc::new(PgCompanyStore::new(ConnectionFactory::new(pool)));
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
