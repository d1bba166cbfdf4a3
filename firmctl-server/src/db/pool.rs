//! Connection factory
//!
//! Pooling is left to sqlx's `PgPool`. The factory only hands out one
//! connection per store operation; the returned guard goes back to the pool
//! when dropped, on every exit path.

use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a free connection before failing the request.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/firmctl").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS, DEFAULT_ACQUIRE_TIMEOUT).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
/// * `acquire_timeout` - How long `create_connection` may wait for a slot
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Hands out connections bound to one connection string.
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    pool: PgPool,
}

impl ConnectionFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a factory without touching the network.
    ///
    /// The first `create_connection` call opens the first connection and
    /// surfaces any driver error there.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// Acquire a connection for a single operation.
    pub async fn create_connection(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p firmctl-server -- --ignored

    #[tokio::test]
    async fn lazy_factory_rejects_malformed_url() {
        assert!(ConnectionFactory::connect_lazy("not a url").is_err());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn factory_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        let factory = ConnectionFactory::new(pool);

        let mut conn = factory.create_connection().await.expect("acquire failed");
        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&mut *conn)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn connections_return_to_pool() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 1, Duration::from_secs(2))
            .await
            .expect("pool creation failed");
        let factory = ConnectionFactory::new(pool);

        // With a single slot, each acquire only succeeds if the previous guard was released
        for _ in 0..3 {
            let conn = factory.create_connection().await.expect("acquire failed");
            drop(conn);
        }
    }
}
