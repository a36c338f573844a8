//! Payment schedule generation for financed contracts.
//!
//! Builds the ordered schedule a financing contract displays: line 0 is the
//! down payment, lines 1..=term are fixed monthly installments. All math in
//! `rust_decimal::Decimal`; currency formatting is the caller's concern.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::AmortizationError;
use crate::payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::AmortizationResult;

/// Monetary precision: cents.
const CENTS: u32 = 2;

/// Input for schedule generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Contract principal before the down payment
    pub principal: Money,
    /// Amount paid up front at contract start
    pub down_payment: Money,
    /// Number of monthly installments
    pub term_months: u32,
    /// Annual interest rate in percent (12.5 means 12.5%)
    pub annual_rate_percent: Rate,
    /// Due date of the down payment; installment i is due i months later
    pub start_date: NaiveDate,
}

/// A single line in the payment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLine {
    /// 0 for the down payment, 1..=term for installments
    pub index: u32,
    pub due_date: NaiveDate,
    pub label: String,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// Full schedule with totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub lines: Vec<PaymentLine>,
    pub financed_amount: Money,
    pub monthly_rate: Rate,
    pub fixed_payment: Money,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
    pub total_paid: Money,
}

/// Generate the full payment schedule for a financing request.
///
/// The schedule has `term_months + 1` lines. Installment amounts are held at
/// cent precision and the final installment absorbs any rounding residue, so
/// principal portions sum exactly to the financed amount and the balance
/// lands on exactly zero.
///
/// A down payment larger than the principal is passed through rather than
/// rejected: the financed amount goes negative and so do the principal
/// portions. A warning is attached to the output envelope.
pub fn generate_schedule(
    request: &ScheduleRequest,
) -> AmortizationResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(request)?;

    let financed = request.principal - request.down_payment;
    if financed < Decimal::ZERO {
        warnings.push(
            "Down payment exceeds principal; financed amount and principal portions are negative"
                .into(),
        );
    }

    let monthly_rate = payment::monthly_rate(request.annual_rate_percent);
    let fixed = payment::fixed_payment(financed, monthly_rate, request.term_months)?
        .round_dp(CENTS);

    let mut lines = Vec::with_capacity(request.term_months as usize + 1);
    lines.push(PaymentLine {
        index: 0,
        due_date: request.start_date,
        label: "Down Payment".into(),
        payment_amount: request.down_payment,
        principal_portion: Decimal::ZERO,
        interest_portion: Decimal::ZERO,
        remaining_balance: financed,
    });

    if monthly_rate.is_zero() {
        build_zero_rate_lines(request, financed, fixed, &mut lines)?;
    } else {
        build_amortizing_lines(request, financed, monthly_rate, fixed, &mut lines)?;
    }

    let total_principal_paid: Money = lines[1..].iter().map(|l| l.principal_portion).sum();
    let total_interest_paid: Money = lines[1..].iter().map(|l| l.interest_portion).sum();
    let total_paid: Money = lines.iter().map(|l| l.payment_amount).sum();

    let output = ScheduleOutput {
        lines,
        financed_amount: financed,
        monthly_rate,
        fixed_payment: fixed,
        total_principal_paid,
        total_interest_paid,
        total_paid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Payment Amortization Schedule",
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "down_payment": request.down_payment.to_string(),
            "term_months": request.term_months,
            "annual_rate_percent": request.annual_rate_percent.to_string(),
            "start_date": request.start_date.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate(request: &ScheduleRequest) -> AmortizationResult<()> {
    if request.term_months == 0 {
        return Err(AmortizationError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    if request.principal < Decimal::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must not be negative".into(),
        });
    }
    if request.down_payment < Decimal::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment must not be negative".into(),
        });
    }
    if request.annual_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate must not be negative".into(),
        });
    }
    Ok(())
}

/// Installment due date: start date plus `month` calendar months.
/// `checked_add_months` clamps month-end, e.g. Jan 31 + 1 month = Feb 28.
fn due_date(start: NaiveDate, month: u32) -> AmortizationResult<NaiveDate> {
    start
        .checked_add_months(Months::new(month))
        .ok_or_else(|| {
            AmortizationError::DateError(format!(
                "Due date overflows calendar: {start} + {month} months"
            ))
        })
}

/// Zero-interest path: equal principal installments, no interest portion.
fn build_zero_rate_lines(
    request: &ScheduleRequest,
    financed: Money,
    installment: Money,
    lines: &mut Vec<PaymentLine>,
) -> AmortizationResult<()> {
    let mut balance = financed;

    for month in 1..=request.term_months {
        let principal = if month == request.term_months {
            // Final installment retires the balance exactly
            balance
        } else {
            installment
        };
        balance -= principal;

        lines.push(PaymentLine {
            index: month,
            due_date: due_date(request.start_date, month)?,
            label: format!("Payment {month}"),
            payment_amount: principal,
            principal_portion: principal,
            interest_portion: Decimal::ZERO,
            remaining_balance: balance,
        });
    }

    Ok(())
}

/// Standard path: constant payment, declining interest, rising principal.
fn build_amortizing_lines(
    request: &ScheduleRequest,
    financed: Money,
    monthly_rate: Rate,
    fixed: Money,
    lines: &mut Vec<PaymentLine>,
) -> AmortizationResult<()> {
    let mut balance = financed;

    for month in 1..=request.term_months {
        let interest = (balance * monthly_rate).round_dp(CENTS);
        let mut principal = fixed - interest;

        if month == request.term_months {
            // Final installment retires the balance exactly, absorbing any
            // rounding residue accumulated over the term
            principal = balance;
        } else if balance >= Decimal::ZERO && principal > balance {
            // Rounding paid the loan off early; never let the balance go
            // negative
            principal = balance;
        }
        balance -= principal;

        lines.push(PaymentLine {
            index: month,
            due_date: due_date(request.start_date, month)?,
            label: format!("Payment {month}"),
            payment_amount: principal + interest,
            principal_portion: principal,
            interest_portion: interest,
            remaining_balance: balance,
        });
    }

    Ok(())
}
