//! Row folding helpers shared by the company reads
//!
//! Both helpers work on already-decoded values so the grouping rules can be
//! checked without a database.

use std::collections::HashMap;

use sqlx::Either;

use crate::models::{Company, Employee};

/// Fold flat `(company, employee)` JOIN rows into nested companies.
///
/// The first row seen for a company id registers that company; every row's
/// employee is appended to the registered instance. Output keeps one company
/// per id in first-seen order, employees in row order.
pub fn fold_company_rows<I>(rows: I) -> Vec<Company>
where
    I: IntoIterator<Item = (Company, Employee)>,
{
    let mut index_by_id: HashMap<i32, usize> = HashMap::new();
    let mut companies: Vec<Company> = Vec::new();

    for (company, employee) in rows {
        let slot = match index_by_id.get(&company.id) {
            Some(&slot) => slot,
            None => {
                index_by_id.insert(company.id, companies.len());
                companies.push(Company {
                    employees: Vec::new(),
                    ..company
                });
                companies.len() - 1
            }
        };

        companies[slot].employees.push(employee);
    }

    companies
}

/// Splits a multi-statement stream into per-statement row sets.
///
/// Drivers yield rows for a statement followed by its completion marker
/// (`Either::Left`). Rows are assigned to the statement that is open when
/// they arrive, so sets come out in declared order.
#[derive(Debug)]
pub struct ResultSets<R> {
    done: Vec<Vec<R>>,
    open: Vec<R>,
}

impl<R> Default for ResultSets<R> {
    fn default() -> Self {
        Self {
            done: Vec::new(),
            open: Vec::new(),
        }
    }
}

impl<R> ResultSets<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<Q>(&mut self, step: Either<Q, R>) {
        match step {
            Either::Left(_) => self.done.push(std::mem::take(&mut self.open)),
            Either::Right(row) => self.open.push(row),
        }
    }

    /// Completed sets in order. A trailing set without a completion marker is
    /// kept as the last entry.
    pub fn into_sets(mut self) -> Vec<Vec<R>> {
        if !self.open.is_empty() {
            self.done.push(self.open);
        }
        self.done
    }
}
