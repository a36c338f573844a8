use amortization_core::payment;
use amortization_core::schedule::{self, ScheduleRequest};
use amortization_core::AmortizationError;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Schedule properties
// ===========================================================================

fn request(
    principal: Decimal,
    down_payment: Decimal,
    term_months: u32,
    annual_rate_percent: Decimal,
) -> ScheduleRequest {
    ScheduleRequest {
        principal,
        down_payment,
        term_months,
        annual_rate_percent,
        start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
    }
}

#[test]
fn test_schedule_length_is_term_plus_one() {
    for term in [1, 7, 12, 36, 360] {
        let result = schedule::generate_schedule(&request(dec!(50000), dec!(5000), term, dec!(8.5)))
            .unwrap();
        assert_eq!(result.result.lines.len(), term as usize + 1);
    }
}

#[test]
fn test_principal_portions_sum_to_financed_amount() {
    let result =
        schedule::generate_schedule(&request(dec!(25000), dec!(3000), 48, dec!(9.9))).unwrap();
    let sched = &result.result;

    let principal_sum: Decimal = sched.lines[1..].iter().map(|l| l.principal_portion).sum();
    assert_eq!(principal_sum, dec!(22000));
    assert_eq!(sched.total_principal_paid, dec!(22000));
}

#[test]
fn test_final_balance_is_exactly_zero() {
    let result =
        schedule::generate_schedule(&request(dec!(9999.99), dec!(1234.56), 36, dec!(17.25)))
            .unwrap();
    let last = result.result.lines.last().unwrap();
    assert_eq!(last.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_balance_monotonically_non_increasing() {
    let result =
        schedule::generate_schedule(&request(dec!(18000), dec!(500), 60, dec!(11.4))).unwrap();
    let lines = &result.result.lines;

    for pair in lines.windows(2) {
        assert!(
            pair[1].remaining_balance <= pair[0].remaining_balance,
            "balance rose from {} to {} at line {}",
            pair[0].remaining_balance,
            pair[1].remaining_balance,
            pair[1].index,
        );
    }
}

#[test]
fn test_portions_sum_to_payment_on_every_line() {
    let result =
        schedule::generate_schedule(&request(dec!(32000), dec!(2000), 24, dec!(6.75))).unwrap();

    for line in &result.result.lines[1..] {
        assert_eq!(
            line.principal_portion + line.interest_portion,
            line.payment_amount,
            "line {} portions do not sum to payment",
            line.index,
        );
    }
}

#[test]
fn test_due_dates_strictly_increasing_monthly() {
    let result =
        schedule::generate_schedule(&request(dec!(6000), Decimal::ZERO, 6, dec!(5))).unwrap();
    let lines = &result.result.lines;

    assert_eq!(lines[0].due_date, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    assert_eq!(lines[1].due_date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    assert_eq!(lines[6].due_date, NaiveDate::from_ymd_opt(2026, 8, 1).unwrap());

    for pair in lines.windows(2) {
        assert!(pair[1].due_date > pair[0].due_date);
    }
}

// ===========================================================================
// Zero-rate special case
// ===========================================================================

#[test]
fn test_zero_rate_concrete_scenario() {
    // 10000 principal, 2000 down, 12 months, 0%: financed 8000,
    // installments of 8000/12 = 666.67 with the final line absorbing
    let result =
        schedule::generate_schedule(&request(dec!(10000), dec!(2000), 12, Decimal::ZERO)).unwrap();
    let sched = &result.result;

    assert_eq!(sched.financed_amount, dec!(8000));
    assert_eq!(sched.fixed_payment, dec!(666.67));

    for line in &sched.lines[1..] {
        assert_eq!(line.interest_portion, Decimal::ZERO);
    }
    assert_eq!(sched.lines[1].payment_amount, dec!(666.67));
    assert_eq!(sched.lines.last().unwrap().remaining_balance, Decimal::ZERO);
    assert_eq!(sched.total_interest_paid, Decimal::ZERO);
    assert_eq!(sched.total_principal_paid, dec!(8000));
}

#[test]
fn test_zero_rate_evenly_divisible_term() {
    // 1200 over 12 months divides evenly; every installment identical
    let result =
        schedule::generate_schedule(&request(dec!(1200), Decimal::ZERO, 12, Decimal::ZERO))
            .unwrap();
    for line in &result.result.lines[1..] {
        assert_eq!(line.payment_amount, dec!(100));
        assert_eq!(line.principal_portion, dec!(100));
    }
}

// ===========================================================================
// Interest-bearing scenarios
// ===========================================================================

#[test]
fn test_single_payment_at_twelve_percent() {
    // Monthly rate 1%: one payment of 10100 = 10000 principal + 100 interest
    let result =
        schedule::generate_schedule(&request(dec!(10000), Decimal::ZERO, 1, dec!(12))).unwrap();
    let sched = &result.result;

    assert_eq!(sched.monthly_rate, dec!(0.01));
    let line = &sched.lines[1];
    assert_eq!(line.interest_portion, dec!(100));
    assert_eq!(line.principal_portion, dec!(10000));
    assert_eq!(line.payment_amount, dec!(10100));
    assert_eq!(line.remaining_balance, Decimal::ZERO);
}

#[test]
fn test_interest_declines_as_principal_rises() {
    let result =
        schedule::generate_schedule(&request(dec!(12000), Decimal::ZERO, 12, dec!(12))).unwrap();
    let lines = &result.result.lines;

    for pair in lines[1..].windows(2) {
        assert!(pair[1].interest_portion < pair[0].interest_portion);
        assert!(pair[1].principal_portion > pair[0].principal_portion);
    }
}

#[test]
fn test_fixed_payment_constant_until_final_line() {
    let result =
        schedule::generate_schedule(&request(dec!(12000), Decimal::ZERO, 12, dec!(12))).unwrap();
    let sched = &result.result;

    // 12000 at 1% monthly over 12 months: ~1066.19
    assert!((sched.fixed_payment - dec!(1066.19)).abs() < dec!(0.01));
    for line in &sched.lines[1..12] {
        assert_eq!(line.payment_amount, sched.fixed_payment);
    }
    // Final payment differs from the fixed payment only by rounding residue
    let last = sched.lines.last().unwrap();
    assert!((last.payment_amount - sched.fixed_payment).abs() < dec!(0.10));
}

#[test]
fn test_total_interest_plus_principal_equals_total_installments() {
    let result =
        schedule::generate_schedule(&request(dec!(20000), dec!(1500), 36, dec!(7.2))).unwrap();
    let sched = &result.result;

    let installments: Decimal = sched.lines[1..].iter().map(|l| l.payment_amount).sum();
    assert_eq!(
        sched.total_principal_paid + sched.total_interest_paid,
        installments
    );
    assert_eq!(sched.total_paid, installments + dec!(1500));
}

// ===========================================================================
// Edge cases and failure conditions
// ===========================================================================

#[test]
fn test_zero_term_is_invalid_input() {
    let err = schedule::generate_schedule(&request(dec!(1000), Decimal::ZERO, 0, dec!(5)))
        .unwrap_err();
    match err {
        AmortizationError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_fully_financed_by_down_payment() {
    // Down payment equals principal: every installment is zero
    let result =
        schedule::generate_schedule(&request(dec!(5000), dec!(5000), 6, dec!(10))).unwrap();
    let sched = &result.result;

    assert_eq!(sched.financed_amount, Decimal::ZERO);
    for line in &sched.lines[1..] {
        assert_eq!(line.payment_amount, Decimal::ZERO);
        assert_eq!(line.remaining_balance, Decimal::ZERO);
    }
}

#[test]
fn test_down_payment_above_principal_passes_through() {
    let result =
        schedule::generate_schedule(&request(dec!(5000), dec!(8000), 12, dec!(6))).unwrap();
    let sched = &result.result;

    assert_eq!(sched.financed_amount, dec!(-3000));
    assert!(result.warnings.iter().any(|w| w.contains("exceeds principal")));
    assert!(sched.lines[1].principal_portion < Decimal::ZERO);
    assert_eq!(sched.lines.last().unwrap().remaining_balance, Decimal::ZERO);
}

#[test]
fn test_negative_rate_rejected() {
    assert!(schedule::generate_schedule(&request(dec!(1000), Decimal::ZERO, 12, dec!(-1)))
        .is_err());
}

// ===========================================================================
// Payment solver
// ===========================================================================

#[test]
fn test_solver_agrees_with_schedule() {
    let req = request(dec!(15000), dec!(1000), 24, dec!(9));
    let result = schedule::generate_schedule(&req).unwrap();

    let rate = payment::monthly_rate(req.annual_rate_percent);
    let solved = payment::fixed_payment(dec!(14000), rate, 24).unwrap().round_dp(2);
    assert_eq!(result.result.fixed_payment, solved);
}
