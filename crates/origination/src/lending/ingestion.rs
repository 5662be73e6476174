//! Bulk CSV ingestion for the customer and loan books.
//!
//! Rows follow the upstream spreadsheet columns. Loading is get-or-create:
//! rows whose id already exists are left untouched, and loans referencing an
//! unknown customer are skipped and counted rather than failing the batch.

use std::io::Read;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{Customer, CustomerId, Loan, LoanId};
use super::repository::{LendingRepository, RepositoryError};

/// Counters describing what a bulk load actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub customers_added: usize,
    pub customers_existing: usize,
    pub loans_added: usize,
    pub loans_existing: usize,
    pub loans_orphaned: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub fn parse_customers<R: Read>(reader: R) -> Result<Vec<Customer>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CustomerRow>() {
        records.push(row?.into_customer());
    }
    Ok(records)
}

pub fn parse_loans<R: Read>(reader: R) -> Result<Vec<Loan>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<LoanRow>() {
        records.push(row?.into_loan());
    }
    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    customer_id: u64,
    first_name: String,
    last_name: String,
    age: u8,
    phone_number: String,
    monthly_salary: Decimal,
    approved_limit: Decimal,
    #[serde(default)]
    current_debt: Option<Decimal>,
}

impl CustomerRow {
    fn into_customer(self) -> Customer {
        Customer {
            id: CustomerId(self.customer_id),
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            phone_number: self.phone_number,
            monthly_salary: self.monthly_salary,
            approved_limit: self.approved_limit,
            current_debt: self.current_debt.unwrap_or(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LoanRow {
    customer_id: u64,
    loan_id: u64,
    loan_amount: Decimal,
    tenure: u32,
    interest_rate: Decimal,
    monthly_repayment: Decimal,
    emis_paid_on_time: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl LoanRow {
    fn into_loan(self) -> Loan {
        Loan {
            id: LoanId(self.loan_id),
            customer_id: CustomerId(self.customer_id),
            amount: self.loan_amount,
            tenure_months: self.tenure,
            interest_rate: self.interest_rate,
            monthly_repayment: self.monthly_repayment,
            emis_paid_on_time: self.emis_paid_on_time,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Loads parsed records through the repository.
pub struct BulkIngestor<'a, S> {
    store: &'a S,
}

impl<'a, S> BulkIngestor<'a, S>
where
    S: LendingRepository,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn load_customers<R: Read>(
        &self,
        reader: R,
        report: &mut IngestReport,
    ) -> Result<(), IngestError> {
        for customer in parse_customers(reader)? {
            if self.store.customer(customer.id)?.is_some() {
                report.customers_existing += 1;
                continue;
            }
            self.store.upsert_customer(customer)?;
            report.customers_added += 1;
        }
        Ok(())
    }

    pub fn load_loans<R: Read>(
        &self,
        reader: R,
        report: &mut IngestReport,
    ) -> Result<(), IngestError> {
        for loan in parse_loans(reader)? {
            if self.store.customer(loan.customer_id)?.is_none() {
                tracing::warn!(
                    loan_id = loan.id.0,
                    customer_id = loan.customer_id.0,
                    "skipping loan for unknown customer"
                );
                report.loans_orphaned += 1;
                continue;
            }
            if self.store.loan(loan.id)?.is_some() {
                report.loans_existing += 1;
                continue;
            }
            self.store.upsert_loan(loan)?;
            report.loans_added += 1;
        }
        Ok(())
    }
}
