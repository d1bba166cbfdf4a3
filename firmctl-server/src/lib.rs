//! firmctl-server: REST API over the companies database
//!
//! Layers, leaf to root:
//! - `db`: connection factory, schema bootstrap and the `CompanyStore`
//!   repository (hand-written SQL, manual row mapping)
//! - `models`: entities and validated request payloads
//! - `http`: axum routes translating requests into store calls

pub mod db;
pub mod http;
pub mod models;

pub use db::{CompanyStore, ConnectionFactory, DbError, PgCompanyStore};
pub use http::{run_server, ServerConfig};
pub use models::{Company, CompanyForCreationDto, CompanyForUpdateDto, Employee};
