//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One connection per call, acquired from the `ConnectionFactory`
//! - Parameterized statements, rows mapped by column name
//! - Transactions for multi-statement writes

pub mod companies;
pub mod mapping;

#[cfg(test)]
pub(crate) mod memory;

pub use companies::{CompanyStore, PgCompanyStore};
pub use mapping::{fold_company_rows, ResultSets};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
