//! Company entity and its input payloads
//!
//! Creation and update payloads carry only the writable columns, so a client
//! can never set `id` or `employees` through them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Employee, ValidationError};

/// Maximum length for any company text column
const MAX_FIELD_LEN: usize = 255;

/// Company aggregate root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub country: String,

    /// Populated only by the multi-result and multi-mapping reads.
    #[sqlx(skip)]
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// Payload for `POST /api/companies` and each item of `POST /api/companies/multiple`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyForCreationDto {
    pub name: String,
    pub address: String,
    pub country: String,
}

/// Payload for `PUT /api/companies/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyForUpdateDto {
    pub name: String,
    pub address: String,
    pub country: String,
}

impl Company {
    /// Build the entity returned after an insert.
    pub fn from_created(id: i32, dto: &CompanyForCreationDto) -> Self {
        Self {
            id,
            name: dto.name.clone(),
            address: dto.address.clone(),
            country: dto.country.clone(),
            employees: Vec::new(),
        }
    }
}

impl CompanyForCreationDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_columns(&self.name, &self.address, &self.country)
    }
}

impl CompanyForUpdateDto {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_columns(&self.name, &self.address, &self.country)
    }
}

fn check_columns(name: &str, address: &str, country: &str) -> Result<(), ValidationError> {
    check_text("name", name)?;
    check_text("address", address)?;
    check_text("country", country)
}

fn check_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }

    Ok(())
}
