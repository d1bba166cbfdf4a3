//! Employee entity

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employee row, owned by exactly one company at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub position: String,
    pub company_id: i32,
}
