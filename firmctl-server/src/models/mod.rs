//! Domain models and request payloads
//!
//! Entities are built by the repository from rows. DTOs are the only
//! shapes accepted from clients and are validated before any SQL runs.

pub mod company;
pub mod employee;
pub mod validation;

pub use company::{Company, CompanyForCreationDto, CompanyForUpdateDto};
pub use employee::Employee;
pub use validation::ValidationError;
