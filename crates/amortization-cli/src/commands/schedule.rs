use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use amortization_core::payment;
use amortization_core::schedule::{self, ScheduleRequest};
use amortization_core::types::with_metadata;

use crate::input;

/// Arguments for schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Contract principal before the down payment
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Amount paid up front at contract start
    #[arg(long, alias = "down")]
    pub down_payment: Option<Decimal>,

    /// Number of monthly installments
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,

    /// Annual interest rate in percent (e.g. 12.5 for 12.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Down payment due date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the fixed-payment solver
#[derive(Args)]
pub struct PaymentArgs {
    /// Contract principal before the down payment
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Amount paid up front at contract start
    #[arg(long, alias = "down", default_value = "0")]
    pub down_payment: Decimal,

    /// Number of monthly installments
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,

    /// Annual interest rate in percent (e.g. 12.5 for 12.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ScheduleRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScheduleRequest {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            down_payment: args.down_payment.unwrap_or(Decimal::ZERO),
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            start_date: args
                .start_date
                .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        }
    };

    let result = schedule::generate_schedule(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let principal = args.principal.ok_or("--principal is required")?;
    let term_months = args.term_months.ok_or("--term-months is required")?;
    let annual_rate = args.annual_rate.ok_or("--annual-rate is required")?;

    let financed = principal - args.down_payment;
    let monthly_rate = payment::monthly_rate(annual_rate);
    let fixed = payment::fixed_payment(financed, monthly_rate, term_months)?.round_dp(2);

    let elapsed = start.elapsed().as_micros() as u64;
    let result = with_metadata(
        "Fixed Payment Solver",
        &serde_json::json!({
            "principal": principal.to_string(),
            "down_payment": args.down_payment.to_string(),
            "term_months": term_months,
            "annual_rate_percent": annual_rate.to_string(),
        }),
        Vec::new(),
        elapsed,
        serde_json::json!({
            "financed_amount": financed.to_string(),
            "monthly_rate": monthly_rate.round_dp(8).to_string(),
            "fixed_payment": fixed.to_string(),
            "total_of_installments": (fixed * Decimal::from(term_months)).round_dp(2).to_string(),
        }),
    );

    Ok(serde_json::to_value(result)?)
}
