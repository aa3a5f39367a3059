//! Deterministic scoring tools backing the evaluators.
//!
//! These stand in for the real registry/bureau integrations: each one maps
//! the raw application text to a verdict with no ambient state. Unparseable
//! input is recovered locally with a safe fallback, never an error.

use crate::parse::field_ci;
use crate::record::{IncomeStatus, KycStatus, RiskScore};
use serde_json::Value;

/// Identity number on the sanctions stand-in list.
const REJECTED_CPF: &str = "123.456.789-00";

/// Validate a CPF, formatted or unformatted.
pub fn validate_cpf(cpf: &str) -> KycStatus {
    if cpf == REJECTED_CPF {
        KycStatus::Rejected
    } else {
        KycStatus::Approved
    }
}

/// Score fraud risk from the application amount.
pub fn score_fraud_risk(application_json: &str) -> RiskScore {
    match amount_field(application_json) {
        Some(amount) if amount >= 100_000.0 => RiskScore::High,
        Some(amount) if amount >= 60_000.0 => RiskScore::Medium,
        Some(_) => RiskScore::Low,
        None => RiskScore::Review,
    }
}

/// Score income sufficiency from the application amount.
pub fn score_income(application_json: &str) -> IncomeStatus {
    match amount_field(application_json) {
        Some(amount) if amount <= 75_000.0 => IncomeStatus::Sufficient,
        Some(_) => IncomeStatus::Insufficient,
        None => IncomeStatus::Review,
    }
}

fn amount_field(application_json: &str) -> Option<f64> {
    let value: Value = serde_json::from_str(application_json).ok()?;
    field_ci(&value, "amount")?.as_f64()
}
