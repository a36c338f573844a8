//! Fixed-payment math for amortizing loans.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Money, Rate};
use crate::AmortizationResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Convert an annual rate in percent (12.5 = 12.5%) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / HUNDRED / MONTHS_PER_YEAR
}

/// Solve the constant per-month payment that retires `financed_amount`
/// over `term_months` at `monthly_rate`.
///
/// Zero-rate loans fall back to straight division; everything else uses the
/// standard annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`.
pub fn fixed_payment(
    financed_amount: Money,
    monthly_rate: Rate,
    term_months: u32,
) -> AmortizationResult<Money> {
    if term_months == 0 {
        return Err(AmortizationError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }

    if monthly_rate.is_zero() {
        return Ok(financed_amount / Decimal::from(term_months));
    }

    let one_plus_r = Decimal::ONE + monthly_rate;
    let factor = one_plus_r.powd(Decimal::from(term_months));
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(AmortizationError::DivisionByZero {
            context: "amortization annuity factor".into(),
        });
    }

    Ok(financed_amount * monthly_rate * factor / denominator)
}
