use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::PolicyConfig;
use super::decision::DecisionEngine;
use super::domain::{
    ActiveLoanView, Customer, CustomerId, CustomerView, Loan, LoanDetailView, LoanId, LoanRequest,
    RegistrationRequest,
};
use super::money;
use super::repository::{LendingRepository, NewCustomer, NewLoan, RepositoryError};
use super::validation::{self, ValidationError};

/// Eligibility response: the decision as a dry run, nothing persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub customer_id: CustomerId,
    pub approved: bool,
    pub interest_rate: Decimal,
    pub corrected_interest_rate: Decimal,
    pub tenure_months: u32,
    pub monthly_installment: Decimal,
}

/// Origination response; `loan_id` is present only on approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginationReceipt {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub approved: bool,
    pub message: String,
    pub monthly_installment: Decimal,
}

/// Error raised by the origination service. Declines are not errors; they
/// come back as ordinary reports with `approved: false`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error("loan not found")]
    LoanNotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Service composing validation, the decision engine, and the repository.
pub struct LoanOriginationService<R> {
    repository: Arc<R>,
    engine: DecisionEngine,
    origination_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl<R> LoanOriginationService<R>
where
    R: LendingRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: PolicyConfig) -> Self {
        Self {
            repository,
            engine: DecisionEngine::new(config),
            origination_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Register a customer, deriving the approved limit from salary.
    pub fn register_customer(
        &self,
        request: RegistrationRequest,
    ) -> Result<CustomerView, ServiceError> {
        let phone = request.phone_number.trim().to_string();
        let phone_in_use = !phone.is_empty() && self.repository.customer_by_phone(&phone)?.is_some();
        validation::validate_registration(&request, phone_in_use)?;

        let monthly_salary = money::to_currency(request.monthly_income);
        let approved_limit =
            money::approved_limit(monthly_salary, self.engine.config().salary_limit_multiplier);

        let customer = self.repository.insert_customer(NewCustomer {
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            phone_number: phone,
            monthly_salary,
            approved_limit,
            current_debt: Decimal::ZERO,
        })?;

        tracing::info!(
            customer_id = customer.id.0,
            approved_limit = %customer.approved_limit,
            "customer registered"
        );
        Ok(customer.view())
    }

    /// Dry-run the decision pipeline. Read-only, so no lock is taken.
    pub fn check_eligibility(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<EligibilityReport, ServiceError> {
        let (customer, loans) = self.load_customer_history(request.customer_id)?;
        validation::validate_loan_request(request, &customer, self.engine.config())?;

        let decision = self.engine.decide(&customer, &loans, request, today);
        Ok(EligibilityReport {
            customer_id: customer.id,
            approved: decision.approved,
            interest_rate: decision.requested_rate,
            corrected_interest_rate: decision.corrected_rate,
            tenure_months: decision.tenure_months,
            monthly_installment: decision.monthly_installment,
        })
    }

    /// Run the decision pipeline and persist the loan on approval.
    ///
    /// Serialized per customer: the lock spans read-active-loans → decide →
    /// persist, so two concurrent requests cannot both squeeze through the
    /// affordability gate.
    pub fn create_loan(
        &self,
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<OriginationReceipt, ServiceError> {
        let lock = self.customer_lock(request.customer_id);
        let _guard = lock.lock().expect("origination mutex poisoned");

        let (customer, loans) = self.load_customer_history(request.customer_id)?;
        validation::validate_loan_request(request, &customer, self.engine.config())?;

        let decision = self.engine.decide(&customer, &loans, request, today);
        if !decision.approved {
            let reason = decision
                .decline_reason
                .map(|reason| reason.message())
                .unwrap_or("declined");
            return Ok(OriginationReceipt {
                loan_id: None,
                customer_id: customer.id,
                approved: false,
                message: format!("loan not approved: {reason}"),
                monthly_installment: decision.monthly_installment,
            });
        }

        let end_date = today + Duration::days(i64::from(request.tenure_months) * 30);
        let loan = self.repository.insert_loan(NewLoan {
            customer_id: customer.id,
            amount: request.loan_amount,
            tenure_months: request.tenure_months,
            interest_rate: decision.corrected_rate,
            monthly_repayment: decision.monthly_installment,
            emis_paid_on_time: 0,
            start_date: today,
            end_date,
        })?;

        tracing::info!(
            customer_id = customer.id.0,
            loan_id = loan.id.0,
            rate = %decision.corrected_rate,
            "loan originated"
        );
        Ok(OriginationReceipt {
            loan_id: Some(loan.id),
            customer_id: customer.id,
            approved: true,
            message: "loan approved successfully".to_string(),
            monthly_installment: decision.monthly_installment,
        })
    }

    pub fn loan_detail(&self, id: LoanId) -> Result<LoanDetailView, ServiceError> {
        let loan = self.repository.loan(id)?.ok_or(ServiceError::LoanNotFound)?;
        let customer = self
            .repository
            .customer(loan.customer_id)?
            .ok_or(ServiceError::CustomerNotFound)?;
        Ok(loan.detail_view(&customer))
    }

    /// Currently-active loans for a customer, with months left on each.
    pub fn active_loans(
        &self,
        id: CustomerId,
        today: NaiveDate,
    ) -> Result<Vec<ActiveLoanView>, ServiceError> {
        if self.repository.customer(id)?.is_none() {
            return Err(ServiceError::CustomerNotFound);
        }
        let loans = self.repository.active_loans_for_customer(id, today)?;
        Ok(loans.iter().map(|loan| loan.active_view(today)).collect())
    }

    fn load_customer_history(&self, id: CustomerId) -> Result<(Customer, Vec<Loan>), ServiceError> {
        let customer = self
            .repository
            .customer(id)?
            .ok_or(ServiceError::CustomerNotFound)?;
        let loans = self.repository.loans_for_customer(id)?;
        Ok((customer, loans))
    }

    fn customer_lock(&self, id: CustomerId) -> Arc<Mutex<()>> {
        let mut locks = self
            .origination_locks
            .lock()
            .expect("lock table mutex poisoned");
        locks
            .entry(id.0)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
