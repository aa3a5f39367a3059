//! Triage Domain - pure domain model for credit application triage
//!
//! Provides the building blocks the workflow crate composes:
//! - Typed evaluator records and verdict enums
//! - Deterministic scoring tools (KYC, fraud risk, income)
//! - Case-insensitive payload parsing and producer-label correction
//! - The decision fusion policy
//!
//! No async, no IO: everything here is a pure function of its inputs.

pub mod decide;
pub mod error;
pub mod parse;
pub mod producer;
pub mod record;
pub mod tools;

// Re-export key types
pub use decide::decide;
pub use error::{DomainError, Result};
pub use parse::EvaluatorRecord;
pub use producer::ProducerId;
pub use record::{
    ApplicationRequest, DecisionDetails, DecisionResult, EvaluatorMessage, FraudRecord,
    IncomeRecord, IncomeStatus, KycRecord, KycStatus, Outcome, RiskScore,
};
