//! Company endpoints
//!
//! Thin translation between HTTP and `CompanyStore`. Update and delete look
//! the company up first because the store treats absent ids as no-ops.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Company, CompanyForCreationDto, CompanyForUpdateDto};

/// Base path shared by every company route
pub const BASE_PATH: &str = "/api/companies";

/// GET /api/companies
async fn list_companies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state.store.list_companies().await?;
    Ok(Json(companies))
}

/// GET /api/companies/{id}
async fn get_company(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .store
        .get_company(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "company",
            id,
        })?;

    Ok(Json(company))
}

/// POST /api/companies
async fn create_company(
    State(state): State<Arc<AppState>>,
    ValidJson(dto): ValidJson<CompanyForCreationDto>,
) -> Result<impl IntoResponse, ApiError> {
    dto.validate()?;
    let company = state.store.create_company(&dto).await?;
    tracing::info!(id = company.id, "company created");

    let location = format!("{}/{}", BASE_PATH, company.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(company),
    ))
}

/// PUT /api/companies/{id}
async fn update_company(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(dto): ValidJson<CompanyForUpdateDto>,
) -> Result<StatusCode, ApiError> {
    dto.validate()?;
    ensure_exists(&state, id).await?;

    state.store.update_company(id, &dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/companies/{id}
async fn delete_company(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    ensure_exists(&state, id).await?;

    state.store.delete_company(id).await?;
    tracing::info!(id, "company deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/companies/ByEmployeeId/{id}
async fn get_company_for_employee(
    State(state): State<Arc<AppState>>,
    ValidId(employee_id): ValidId,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .store
        .get_company_by_employee_id(employee_id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "employee",
            id: employee_id,
        })?;

    Ok(Json(company))
}

/// GET /api/companies/{id}/MultipleResult
async fn get_company_employees_multiple_result(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Company>, ApiError> {
    let company = state
        .store
        .get_company_employees_multiple_results(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "company",
            id,
        })?;

    Ok(Json(company))
}

/// GET /api/companies/MultipleMapping
async fn get_companies_employees_multiple_mapping(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Company>>, ApiError> {
    let companies = state.store.get_companies_employees_multiple_mapping().await?;
    Ok(Json(companies))
}

/// POST /api/companies/multiple
async fn create_multiple_companies(
    State(state): State<Arc<AppState>>,
    ValidJson(companies): ValidJson<Vec<CompanyForCreationDto>>,
) -> Result<StatusCode, ApiError> {
    for dto in &companies {
        dto.validate()?;
    }

    state.store.create_multiple_companies(&companies).await?;
    tracing::info!(count = companies.len(), "companies created");
    Ok(StatusCode::CREATED)
}

async fn ensure_exists(state: &AppState, id: i32) -> Result<(), ApiError> {
    match state.store.get_company(id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound {
            resource: "company",
            id,
        }),
    }
}

/// Company routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(BASE_PATH, get(list_companies).post(create_company))
        .route(
            "/api/companies/{id}",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route(
            "/api/companies/ByEmployeeId/{id}",
            get(get_company_for_employee),
        )
        .route(
            "/api/companies/{id}/MultipleResult",
            get(get_company_employees_multiple_result),
        )
        .route(
            "/api/companies/MultipleMapping",
            get(get_companies_employees_multiple_mapping),
        )
        .route("/api/companies/multiple", post(create_multiple_companies))
}
