//! Database layer - connection factory, schema and repositories
//!
//! # Design Principles
//!
//! - One pooled connection per store operation, released on drop
//! - Hand-written parameterized SQL, rows mapped by column name
//! - Transactions only where several statements must land together

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options, ConnectionFactory};
pub use repos::*;
