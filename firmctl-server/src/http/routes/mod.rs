//! Route handlers organized by resource

pub mod companies;
pub mod health;
