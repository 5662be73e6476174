use crate::infra::{default_policy_config, parse_date, InMemoryLendingRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use rust_decimal::Decimal;
use std::sync::Arc;

use origination::error::AppError;
use origination::lending::{LoanOriginationService, LoanRequest, RegistrationRequest};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the decision date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Monthly income for the walkthrough applicant
    #[arg(long, default_value = "50000")]
    pub(crate) monthly_income: Decimal,
    /// Requested loan amount
    #[arg(long, default_value = "100000")]
    pub(crate) loan_amount: Decimal,
    /// Requested annual interest rate, percent
    #[arg(long, default_value = "10")]
    pub(crate) interest_rate: Decimal,
    /// Requested tenure in months
    #[arg(long, default_value_t = 12)]
    pub(crate) tenure_months: u32,
}

/// Walk a fresh customer through registration, an eligibility check, and an
/// origination against an in-memory book, printing each step.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let repository = Arc::new(InMemoryLendingRepository::default());
    let service = LoanOriginationService::new(repository, default_policy_config());

    let customer = service.register_customer(RegistrationRequest {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        age: 34,
        monthly_income: args.monthly_income,
        phone_number: "9890001122".to_string(),
    })?;
    println!(
        "registered {} (customer #{}) with approved limit {}",
        customer.name, customer.customer_id.0, customer.approved_limit
    );

    let request = LoanRequest {
        customer_id: customer.customer_id,
        loan_amount: args.loan_amount,
        interest_rate: args.interest_rate,
        tenure_months: args.tenure_months,
    };

    let eligibility = service.check_eligibility(&request, today)?;
    println!(
        "eligibility on {today}: approved={} rate {} -> {} installment {}",
        eligibility.approved,
        eligibility.interest_rate,
        eligibility.corrected_interest_rate,
        eligibility.monthly_installment
    );

    let receipt = service.create_loan(&request, today)?;
    println!("origination: {}", receipt.message);

    if let Some(loan_id) = receipt.loan_id {
        let detail = service.loan_detail(loan_id)?;
        println!(
            "loan #{} carries {} at {}% for {} months",
            loan_id.0, detail.loan_amount, detail.interest_rate, detail.tenure_months
        );
        let active = service.active_loans(customer.customer_id, today)?;
        println!("active loans on the book: {}", active.len());
    }

    Ok(())
}
