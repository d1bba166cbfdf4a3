//! Schema bootstrap for the companies database
//!
//! The store works against any existing schema of the same shape. This is
//! only for fresh databases and test fixtures; every statement is idempotent.

use sqlx::PgPool;

use super::DbError;

/// Create tables, indexes and the employee lookup function if missing.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema bootstrap...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT NOT NULL,
            country TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            position TEXT NOT NULL,
            company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_employees_company ON employees(company_id)")
        .execute(pool)
        .await?;

    // Lookup lives in the database tier; the store only calls it by name
    sqlx::query(
        r#"
        CREATE OR REPLACE FUNCTION show_company_for_provided_employee_id(emp_id INTEGER)
        RETURNS SETOF companies
        LANGUAGE sql STABLE
        AS $$
            SELECT c.id, c.name, c.address, c.country
            FROM companies c
            JOIN employees e ON c.id = e.company_id
            WHERE e.id = emp_id
        $$
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema bootstrap complete");
    Ok(())
}
