//! Command implementations for firmctl CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};

/// Resolve the database URL from the flag/environment value.
pub(crate) fn require_database_url(database_url: Option<String>) -> Result<String> {
    database_url
        .filter(|url| !url.trim().is_empty())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or a .env file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_database_url_is_rejected() {
        assert!(require_database_url(None).is_err());
        assert!(require_database_url(Some("  ".into())).is_err());
        assert_eq!(
            require_database_url(Some("postgres://localhost/firmctl".into())).unwrap(),
            "postgres://localhost/firmctl"
        );
    }
}
