use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use amortization_core::schedule::ScheduleRequest;
use amortization_core::{payment, schedule};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Generate a full payment schedule from a JSON `ScheduleRequest`.
///
/// The host may omit `start_date`; it defaults to today, since choosing the
/// schedule start is a host concern and the engine itself takes it as an
/// explicit input.
#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let mut value: serde_json::Value =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;

    if let Some(map) = value.as_object_mut() {
        if !map.contains_key("start_date") {
            map.insert(
                "start_date".into(),
                serde_json::Value::String(chrono::Utc::now().date_naive().to_string()),
            );
        }
    }

    let request: ScheduleRequest = serde_json::from_value(value).map_err(to_napi_error)?;
    let output = schedule::generate_schedule(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct FixedPaymentInput {
    principal: Decimal,
    #[serde(default)]
    down_payment: Decimal,
    term_months: u32,
    annual_rate_percent: Decimal,
}

/// Solve just the fixed monthly payment from a JSON input.
#[napi]
pub fn fixed_payment(input_json: String) -> NapiResult<String> {
    let input: FixedPaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;

    let financed = input.principal - input.down_payment;
    let rate = payment::monthly_rate(input.annual_rate_percent);
    let pmt = payment::fixed_payment(financed, rate, input.term_months)
        .map_err(to_napi_error)?
        .round_dp(2);

    serde_json::to_string(&serde_json::json!({
        "financed_amount": financed.to_string(),
        "monthly_rate": rate.round_dp(8).to_string(),
        "fixed_payment": pmt.to_string(),
    }))
    .map_err(to_napi_error)
}
