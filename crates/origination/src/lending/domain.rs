use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier for a registered customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

/// Identifier for an originated or ingested loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LoanId(pub u64);

/// A customer of the lending book.
///
/// `approved_limit` is derived from salary at registration or supplied by
/// bulk ingestion; `current_debt` is an ingestion-time snapshot and is never
/// updated by the origination path, which sums active loans instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub phone_number: String,
    pub monthly_salary: Decimal,
    pub approved_limit: Decimal,
    pub current_debt: Decimal,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn view(&self) -> CustomerView {
        CustomerView {
            customer_id: self.id,
            name: self.full_name(),
            age: self.age,
            monthly_income: self.monthly_salary,
            approved_limit: self.approved_limit,
            phone_number: self.phone_number.clone(),
        }
    }
}

/// A loan owned by exactly one customer. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub tenure_months: u32,
    pub interest_rate: Decimal,
    pub monthly_repayment: Decimal,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Loan {
    /// A loan counts toward exposure until its end date has passed.
    pub fn is_active(&self, on: NaiveDate) -> bool {
        self.end_date >= on
    }

    /// Months still owed, from whole calendar months elapsed since the start
    /// date, clamped to zero once the end date is reached.
    pub fn repayments_left(&self, today: NaiveDate) -> u32 {
        if today >= self.end_date {
            return 0;
        }
        let elapsed = whole_months_between(self.start_date, today).max(0);
        (self.tenure_months as i64 - elapsed).clamp(0, self.tenure_months as i64) as u32
    }

    pub fn active_view(&self, today: NaiveDate) -> ActiveLoanView {
        ActiveLoanView {
            loan_id: self.id,
            loan_amount: self.amount,
            interest_rate: self.interest_rate,
            monthly_repayment: self.monthly_repayment,
            repayments_left: self.repayments_left(today),
        }
    }

    pub fn detail_view(&self, customer: &Customer) -> LoanDetailView {
        LoanDetailView {
            loan_id: self.id,
            customer: CustomerContactView {
                customer_id: customer.id,
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                phone_number: customer.phone_number.clone(),
                age: customer.age,
            },
            loan_amount: self.amount,
            interest_rate: self.interest_rate,
            monthly_repayment: self.monthly_repayment,
            tenure_months: self.tenure_months,
        }
    }
}

fn whole_months_between(start: NaiveDate, today: NaiveDate) -> i64 {
    (today.year() as i64 - start.year() as i64) * 12
        + (today.month() as i64 - start.month() as i64)
}

/// Inbound registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: u8,
    pub monthly_income: Decimal,
    pub phone_number: String,
}

/// Inbound loan request, shared by eligibility checks and origination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub customer_id: CustomerId,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub tenure_months: u32,
}

/// Registration response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub customer_id: CustomerId,
    pub name: String,
    pub age: u8,
    pub monthly_income: Decimal,
    pub approved_limit: Decimal,
    pub phone_number: String,
}

/// Customer summary embedded in a loan detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerContactView {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u8,
}

/// Full detail for a single loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailView {
    pub loan_id: LoanId,
    pub customer: CustomerContactView,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub monthly_repayment: Decimal,
    pub tenure_months: u32,
}

/// Per-loan summary returned by the active-loans listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLoanView {
    pub loan_id: LoanId,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub monthly_repayment: Decimal,
    pub repayments_left: u32,
}
