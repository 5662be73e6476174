use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::lending::config::PolicyConfig;
use crate::lending::domain::{Customer, CustomerId, Loan, LoanId, LoanRequest};
use crate::lending::repository::{LendingRepository, NewCustomer, NewLoan, RepositoryError};
use crate::lending::service::LoanOriginationService;

/// Fixed reporting date so scoring buckets are deterministic.
pub(super) fn today() -> NaiveDate {
    date(2024, 7, 15)
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn policy_config() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn customer(id: u64, monthly_salary: Decimal, approved_limit: Decimal) -> Customer {
    Customer {
        id: CustomerId(id),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        age: 34,
        phone_number: format!("98900011{id:02}"),
        monthly_salary,
        approved_limit,
        current_debt: Decimal::ZERO,
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn loan(
    id: u64,
    customer_id: u64,
    amount: Decimal,
    tenure_months: u32,
    emis_paid_on_time: u32,
    monthly_repayment: Decimal,
    start: NaiveDate,
    end: NaiveDate,
) -> Loan {
    Loan {
        id: LoanId(id),
        customer_id: CustomerId(customer_id),
        amount,
        tenure_months,
        interest_rate: dec!(11),
        monthly_repayment,
        emis_paid_on_time,
        start_date: start,
        end_date: end,
    }
}

pub(super) fn loan_request(
    customer_id: u64,
    amount: Decimal,
    rate: Decimal,
    tenure_months: u32,
) -> LoanRequest {
    LoanRequest {
        customer_id: CustomerId(customer_id),
        loan_amount: amount,
        interest_rate: rate,
        tenure_months,
    }
}

/// Seasoned two-loan history scoring 93 against a 1.8M limit as of
/// `today()`: payment 31.5, utilization 30, history 12, activity 10,
/// diversity 10, truncated from 93.5.
pub(super) fn seasoned_history() -> Vec<Loan> {
    vec![
        loan(
            1,
            1,
            dec!(300000),
            24,
            24,
            dec!(13973),
            date(2019, 3, 1),
            date(2021, 3, 1),
        ),
        loan(
            2,
            1,
            dec!(400000),
            36,
            30,
            dec!(12000),
            date(2022, 1, 10),
            date(2025, 1, 10),
        ),
    ]
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    customers: Mutex<HashMap<u64, Customer>>,
    loans: Mutex<HashMap<u64, Loan>>,
}

impl LendingRepository for MemoryRepository {
    fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut guard = self.customers.lock().expect("customer mutex poisoned");
        let id = guard.keys().max().copied().unwrap_or(0) + 1;
        let record = Customer {
            id: CustomerId(id),
            first_name: customer.first_name,
            last_name: customer.last_name,
            age: customer.age,
            phone_number: customer.phone_number,
            monthly_salary: customer.monthly_salary,
            approved_limit: customer.approved_limit,
            current_debt: customer.current_debt,
        };
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn upsert_customer(&self, customer: Customer) -> Result<(), RepositoryError> {
        let mut guard = self.customers.lock().expect("customer mutex poisoned");
        guard.insert(customer.id.0, customer);
        Ok(())
    }

    fn customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let guard = self.customers.lock().expect("customer mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn customer_by_phone(&self, phone: &str) -> Result<Option<Customer>, RepositoryError> {
        let guard = self.customers.lock().expect("customer mutex poisoned");
        Ok(guard
            .values()
            .find(|customer| customer.phone_number == phone)
            .cloned())
    }

    fn insert_loan(&self, loan: NewLoan) -> Result<Loan, RepositoryError> {
        let mut guard = self.loans.lock().expect("loan mutex poisoned");
        let id = guard.keys().max().copied().unwrap_or(0) + 1;
        let record = Loan {
            id: LoanId(id),
            customer_id: loan.customer_id,
            amount: loan.amount,
            tenure_months: loan.tenure_months,
            interest_rate: loan.interest_rate,
            monthly_repayment: loan.monthly_repayment,
            emis_paid_on_time: loan.emis_paid_on_time,
            start_date: loan.start_date,
            end_date: loan.end_date,
        };
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn upsert_loan(&self, loan: Loan) -> Result<(), RepositoryError> {
        let mut guard = self.loans.lock().expect("loan mutex poisoned");
        guard.insert(loan.id.0, loan);
        Ok(())
    }

    fn loan(&self, id: LoanId) -> Result<Option<Loan>, RepositoryError> {
        let guard = self.loans.lock().expect("loan mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn loans_for_customer(&self, id: CustomerId) -> Result<Vec<Loan>, RepositoryError> {
        let guard = self.loans.lock().expect("loan mutex poisoned");
        let mut loans: Vec<Loan> = guard
            .values()
            .filter(|loan| loan.customer_id == id)
            .cloned()
            .collect();
        loans.sort_by_key(|loan| loan.id);
        Ok(loans)
    }

    fn active_loans_for_customer(
        &self,
        id: CustomerId,
        on: NaiveDate,
    ) -> Result<Vec<Loan>, RepositoryError> {
        Ok(self
            .loans_for_customer(id)?
            .into_iter()
            .filter(|loan| loan.is_active(on))
            .collect())
    }
}

/// Repository that fails every call, for surface-level error mapping tests.
pub(super) struct UnavailableRepository;

impl LendingRepository for UnavailableRepository {
    fn insert_customer(&self, _customer: NewCustomer) -> Result<Customer, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_customer(&self, _customer: Customer) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn customer(&self, _id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn customer_by_phone(&self, _phone: &str) -> Result<Option<Customer>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_loan(&self, _loan: NewLoan) -> Result<Loan, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert_loan(&self, _loan: Loan) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn loan(&self, _id: LoanId) -> Result<Option<Loan>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn loans_for_customer(&self, _id: CustomerId) -> Result<Vec<Loan>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active_loans_for_customer(
        &self,
        _id: CustomerId,
        _on: NaiveDate,
    ) -> Result<Vec<Loan>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn service_with(
    repository: Arc<MemoryRepository>,
) -> LoanOriginationService<MemoryRepository> {
    LoanOriginationService::new(repository, policy_config())
}

pub(super) fn service() -> LoanOriginationService<MemoryRepository> {
    service_with(Arc::new(MemoryRepository::default()))
}
