//! In-memory `CompanyStore` for exercising the HTTP layer without Postgres.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{fold_company_rows, CompanyStore, DbError};
use crate::models::{Company, CompanyForCreationDto, CompanyForUpdateDto, Employee};

#[derive(Default)]
struct Tables {
    next_company_id: i32,
    companies: Vec<Company>,
    employees: Vec<Employee>,
}

/// Mirrors the Postgres store's semantics on plain vectors.
///
/// Names listed in `rejected_names` fail like a constraint violation, which
/// lets tests force a failure in the middle of a batch.
#[derive(Default)]
pub(crate) struct MemoryCompanyStore {
    tables: Mutex<Tables>,
    rejected_names: Vec<String>,
    unavailable: bool,
}

impl MemoryCompanyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn rejecting(name: &str) -> Self {
        Self {
            rejected_names: vec![name.to_owned()],
            ..Self::default()
        }
    }

    /// Every call fails, as if the database were unreachable.
    pub(crate) fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub(crate) fn add_employee(&self, company_id: i32, name: &str) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.employees.len() as i32 + 1;
        tables.employees.push(Employee {
            id,
            name: name.to_owned(),
            age: 30,
            position: "Engineer".into(),
            company_id,
        });
        id
    }

    pub(crate) fn company_count(&self) -> usize {
        self.tables.lock().unwrap().companies.len()
    }

    fn check(&self, name: &str) -> Result<(), DbError> {
        if self.unavailable {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        if self.rejected_names.iter().any(|n| n == name) {
            return Err(sqlx::Error::Protocol(format!("value rejected: {}", name)).into());
        }
        Ok(())
    }
}

fn insert(tables: &mut Tables, dto: &CompanyForCreationDto) -> Company {
    tables.next_company_id += 1;
    let company = Company::from_created(tables.next_company_id, dto);
    tables.companies.push(company.clone());
    company
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn list_companies(&self) -> Result<Vec<Company>, DbError> {
        self.check("")?;
        Ok(self.tables.lock().unwrap().companies.clone())
    }

    async fn get_company(&self, id: i32) -> Result<Option<Company>, DbError> {
        self.check("")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn create_company(&self, company: &CompanyForCreationDto) -> Result<Company, DbError> {
        self.check(&company.name)?;
        Ok(insert(&mut self.tables.lock().unwrap(), company))
    }

    async fn update_company(
        &self,
        id: i32,
        company: &CompanyForUpdateDto,
    ) -> Result<(), DbError> {
        self.check(&company.name)?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(existing) = tables.companies.iter_mut().find(|c| c.id == id) {
            existing.name = company.name.clone();
            existing.address = company.address.clone();
            existing.country = company.country.clone();
        }
        Ok(())
    }

    async fn delete_company(&self, id: i32) -> Result<(), DbError> {
        self.check("")?;
        let mut tables = self.tables.lock().unwrap();
        tables.companies.retain(|c| c.id != id);
        tables.employees.retain(|e| e.company_id != id);
        Ok(())
    }

    async fn get_company_by_employee_id(
        &self,
        employee_id: i32,
    ) -> Result<Option<Company>, DbError> {
        self.check("")?;
        let tables = self.tables.lock().unwrap();
        let owner = tables
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .and_then(|e| tables.companies.iter().find(|c| c.id == e.company_id));
        Ok(owner.cloned())
    }

    async fn get_company_employees_multiple_results(
        &self,
        id: i32,
    ) -> Result<Option<Company>, DbError> {
        self.check("")?;
        let tables = self.tables.lock().unwrap();
        let Some(company) = tables.companies.iter().find(|c| c.id == id) else {
            return Ok(None);
        };
        let mut company = company.clone();
        company.employees = tables
            .employees
            .iter()
            .filter(|e| e.company_id == id)
            .cloned()
            .collect();
        Ok(Some(company))
    }

    async fn get_companies_employees_multiple_mapping(&self) -> Result<Vec<Company>, DbError> {
        self.check("")?;
        let tables = self.tables.lock().unwrap();
        let mut rows = Vec::new();
        for company in &tables.companies {
            for employee in tables.employees.iter().filter(|e| e.company_id == company.id) {
                rows.push((company.clone(), employee.clone()));
            }
        }
        Ok(fold_company_rows(rows))
    }

    async fn create_multiple_companies(
        &self,
        companies: &[CompanyForCreationDto],
    ) -> Result<(), DbError> {
        // Stage into a copy and swap in on success, like a transaction
        let mut tables = self.tables.lock().unwrap();
        let mut staged = Tables {
            next_company_id: tables.next_company_id,
            companies: tables.companies.clone(),
            employees: Vec::new(),
        };
        for company in companies {
            self.check(&company.name)?;
            insert(&mut staged, company);
        }
        tables.next_company_id = staged.next_company_id;
        tables.companies = staged.companies;
        Ok(())
    }
}
