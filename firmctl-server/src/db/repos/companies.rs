//! Company repository
//!
//! Owns every SQL statement for the company/employee aggregate:
//! - single-row reads return `Option`, never a not-found error
//! - create: `INSERT ... RETURNING id` so the identity comes back atomically
//! - multi-result read: two statements, one round trip
//! - multi-mapping read: one JOIN folded into nested companies
//! - batch create: every insert in one transaction

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::PgRow;
use sqlx::{Connection, Executor, FromRow, Row};

use super::mapping::{fold_company_rows, ResultSets};
use super::DbError;
use crate::db::ConnectionFactory;
use crate::models::{Company, CompanyForCreationDto, CompanyForUpdateDto, Employee};

const INSERT_COMPANY: &str =
    "INSERT INTO companies (name, address, country) VALUES ($1, $2, $3)";

const INSERT_COMPANY_RETURNING_ID: &str =
    "INSERT INTO companies (name, address, country) VALUES ($1, $2, $3) RETURNING id";

/// Data access for companies and their employees.
///
/// The HTTP layer only depends on this trait.
#[async_trait]
pub trait CompanyStore: Send + Sync + 'static {
    async fn list_companies(&self) -> Result<Vec<Company>, DbError>;

    async fn get_company(&self, id: i32) -> Result<Option<Company>, DbError>;

    async fn create_company(&self, company: &CompanyForCreationDto) -> Result<Company, DbError>;

    /// No-op when `id` does not exist; callers check existence first.
    async fn update_company(&self, id: i32, company: &CompanyForUpdateDto)
        -> Result<(), DbError>;

    /// No-op when `id` does not exist.
    async fn delete_company(&self, id: i32) -> Result<(), DbError>;

    async fn get_company_by_employee_id(&self, employee_id: i32)
        -> Result<Option<Company>, DbError>;

    /// Company with its employees, or `None` if the company is absent.
    async fn get_company_employees_multiple_results(
        &self,
        id: i32,
    ) -> Result<Option<Company>, DbError>;

    /// Every company that has at least one employee, employees nested.
    async fn get_companies_employees_multiple_mapping(&self) -> Result<Vec<Company>, DbError>;

    /// All-or-nothing insert of every payload.
    async fn create_multiple_companies(
        &self,
        companies: &[CompanyForCreationDto],
    ) -> Result<(), DbError>;
}

/// PostgreSQL-backed company store
#[derive(Debug, Clone)]
pub struct PgCompanyStore {
    factory: ConnectionFactory,
}

impl PgCompanyStore {
    pub fn new(factory: ConnectionFactory) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn list_companies(&self) -> Result<Vec<Company>, DbError> {
        let mut conn = self.factory.create_connection().await?;

        let companies: Vec<Company> = sqlx::query_as(
            "SELECT id, name, address, country FROM companies ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        tracing::debug!(count = companies.len(), "listed companies");
        Ok(companies)
    }

    async fn get_company(&self, id: i32) -> Result<Option<Company>, DbError> {
        let mut conn = self.factory.create_connection().await?;

        let company = sqlx::query_as(
            "SELECT id, name, address, country FROM companies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(company)
    }

    async fn create_company(&self, company: &CompanyForCreationDto) -> Result<Company, DbError> {
        let mut conn = self.factory.create_connection().await?;

        let id: i32 = sqlx::query_scalar(INSERT_COMPANY_RETURNING_ID)
            .bind(&company.name)
            .bind(&company.address)
            .bind(&company.country)
            .fetch_one(&mut *conn)
            .await?;

        tracing::debug!(id, "created company");
        Ok(Company::from_created(id, company))
    }

    async fn update_company(
        &self,
        id: i32,
        company: &CompanyForUpdateDto,
    ) -> Result<(), DbError> {
        let mut conn = self.factory.create_connection().await?;

        let result = sqlx::query(
            "UPDATE companies SET name = $2, address = $3, country = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(&company.name)
        .bind(&company.address)
        .bind(&company.country)
        .execute(&mut *conn)
        .await?;

        tracing::debug!(id, rows = result.rows_affected(), "updated company");
        Ok(())
    }

    async fn delete_company(&self, id: i32) -> Result<(), DbError> {
        let mut conn = self.factory.create_connection().await?;

        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(id, rows = result.rows_affected(), "deleted company");
        Ok(())
    }

    async fn get_company_by_employee_id(
        &self,
        employee_id: i32,
    ) -> Result<Option<Company>, DbError> {
        let mut conn = self.factory.create_connection().await?;

        // fetch_optional keeps the first row if the function returns several
        let company = sqlx::query_as(
            "SELECT id, name, address, country FROM show_company_for_provided_employee_id($1)",
        )
        .bind(employee_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(company)
    }

    async fn get_company_employees_multiple_results(
        &self,
        id: i32,
    ) -> Result<Option<Company>, DbError> {
        // Bind parameters force the extended protocol, which allows one
        // statement per message. The batch goes through the simple protocol
        // instead; `id` is an i32, so the literal cannot carry anything else.
        let batch = format!(
            "SELECT id, name, address, country FROM companies WHERE id = {id}; \
             SELECT id, name, age, position, company_id FROM employees \
             WHERE company_id = {id} ORDER BY id"
        );

        let mut conn = self.factory.create_connection().await?;
        let mut sets = ResultSets::new();
        {
            let mut stream = (&mut *conn).fetch_many(sqlx::raw_sql(&batch));
            while let Some(step) = stream.try_next().await? {
                sets.push(step);
            }
        }

        let mut sets = sets.into_sets().into_iter();
        let company_rows = sets.next().unwrap_or_default();
        let employee_rows = sets.next().unwrap_or_default();

        let Some(row) = company_rows.first() else {
            return Ok(None);
        };

        let mut company = Company::from_row(row)?;
        company.employees = employee_rows
            .iter()
            .map(Employee::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(id, employees = company.employees.len(), "read company with employees");
        Ok(Some(company))
    }

    async fn get_companies_employees_multiple_mapping(&self) -> Result<Vec<Company>, DbError> {
        let mut conn = self.factory.create_connection().await?;

        let rows = sqlx::query(
            r#"
            SELECT
                c.id,
                c.name,
                c.address,
                c.country,
                e.id AS employee_id,
                e.name AS employee_name,
                e.age,
                e.position,
                e.company_id
            FROM companies c
            JOIN employees e ON c.id = e.company_id
            ORDER BY c.id, e.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let pairs = rows
            .iter()
            .map(decode_joined_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(fold_company_rows(pairs))
    }

    async fn create_multiple_companies(
        &self,
        companies: &[CompanyForCreationDto],
    ) -> Result<(), DbError> {
        if companies.is_empty() {
            return Ok(());
        }

        let mut conn = self.factory.create_connection().await?;
        let mut tx = conn.begin().await?;

        for (index, company) in companies.iter().enumerate() {
            let inserted = sqlx::query(INSERT_COMPANY)
                .bind(&company.name)
                .bind(&company.address)
                .bind(&company.country)
                .execute(&mut *tx)
                .await;

            if let Err(err) = inserted {
                tracing::warn!(index, error = %err, "batch insert failed, rolling back");
                // Dropping the transaction also rolls back; the explicit call
                // just surfaces a broken connection in the logs.
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                return Err(err.into());
            }
        }

        tx.commit().await?;
        tracing::debug!(count = companies.len(), "created companies in one transaction");
        Ok(())
    }
}

/// Split one JOIN row into its company and employee halves.
fn decode_joined_row(row: &PgRow) -> Result<(Company, Employee), sqlx::Error> {
    let company = Company::from_row(row)?;
    let employee = Employee {
        id: row.try_get("employee_id")?,
        name: row.try_get("employee_name")?,
        age: row.try_get("age")?,
        position: row.try_get("position")?,
        company_id: row.try_get("company_id")?,
    };
    Ok((company, employee))
}
