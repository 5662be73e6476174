use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use origination::lending::{
    Customer, CustomerId, LendingRepository, Loan, LoanId, NewCustomer, NewLoan, PolicyConfig,
    RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference store backing the service: two mutex-guarded maps with
/// monotonically assigned ids.
#[derive(Default)]
pub(crate) struct InMemoryLendingRepository {
    customers: Mutex<HashMap<u64, Customer>>,
    loans: Mutex<HashMap<u64, Loan>>,
}

impl LendingRepository for InMemoryLendingRepository {
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

pub(crate) fn default_policy_config() -> PolicyConfig {
    PolicyConfig::default()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
