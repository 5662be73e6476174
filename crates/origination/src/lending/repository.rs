use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{Customer, CustomerId, Loan, LoanId};

/// Insert payload for a customer whose id the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone_number: String,
    pub monthly_salary: Decimal,
    pub approved_limit: Decimal,
    pub current_debt: Decimal,
}

/// Insert payload for a loan whose id the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoan {
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub tenure_months: u32,
    pub interest_rate: Decimal,
    pub monthly_repayment: Decimal,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Storage abstraction so scoring and decisioning can be exercised without a
/// live store. Upserts carry explicit ids and exist for bulk ingestion.
pub trait LendingRepository: Send + Sync {
    fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError>;
    fn upsert_customer(&self, customer: Customer) -> Result<(), RepositoryError>;
    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;
    fn customer_by_phone(&self, phone: &str) -> Result<Option<Customer>, RepositoryError>;
    fn insert_loan(&self, loan: NewLoan) -> Result<Loan, RepositoryError>;
    fn upsert_loan(&self, loan: Loan) -> Result<(), RepositoryError>;
    fn loan(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError>;
    fn loans_for_customer(&self, id: CustomerId) -> Result<Vec<Loan>, RepositoryError>;
    fn active_loans_for_customer(
        &self,
        id: CustomerId,
        on: NaiveDate,
    ) -> Result<Vec<Loan>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
