//! Evaluator records and the final decision document.

use crate::producer::ProducerId;
use serde::{Deserialize, Serialize};

/// One credit application, carried as opaque text.
///
/// Conventionally JSON with at least a numeric `amount`, a `currency` and a
/// `cpf` document field, but the dispatcher never inspects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRequest {
    pub text: String,
}

impl ApplicationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A tagged message on its way from an evaluator to the aggregator.
///
/// `producer` is the transport-level identity; the JSON inside `text` carries
/// a self-reported `agent` label which may disagree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorMessage {
    pub producer: ProducerId,
    pub text: String,
}

impl EvaluatorMessage {
    pub fn new(producer: ProducerId, text: impl Into<String>) -> Self {
        Self {
            producer,
            text: text.into(),
        }
    }
}

/// KYC verdict domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KycStatus {
    Approved,
    Rejected,
    Review,
}

impl KycStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            KycStatus::Approved => "Approved",
            KycStatus::Rejected => "Rejected",
            KycStatus::Review => "Review",
        }
    }

    /// Case-insensitive parse; unknown labels are dropped, not errors.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("approved") {
            Some(KycStatus::Approved)
        } else if label.eq_ignore_ascii_case("rejected") {
            Some(KycStatus::Rejected)
        } else if label.eq_ignore_ascii_case("review") {
            Some(KycStatus::Review)
        } else {
            None
        }
    }
}

/// Fraud-risk verdict domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskScore {
    Low,
    Medium,
    High,
    Review,
}

impl RiskScore {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskScore::Low => "Low",
            RiskScore::Medium => "Medium",
            RiskScore::High => "High",
            RiskScore::Review => "Review",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("low") {
            Some(RiskScore::Low)
        } else if label.eq_ignore_ascii_case("medium") {
            Some(RiskScore::Medium)
        } else if label.eq_ignore_ascii_case("high") {
            Some(RiskScore::High)
        } else if label.eq_ignore_ascii_case("review") {
            Some(RiskScore::Review)
        } else {
            None
        }
    }
}

/// Income verdict domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeStatus {
    Sufficient,
    Insufficient,
    Review,
}

impl IncomeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IncomeStatus::Sufficient => "Sufficient",
            IncomeStatus::Insufficient => "Insufficient",
            IncomeStatus::Review => "Review",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("sufficient") {
            Some(IncomeStatus::Sufficient)
        } else if label.eq_ignore_ascii_case("insufficient") {
            Some(IncomeStatus::Insufficient)
        } else if label.eq_ignore_ascii_case("review") {
            Some(IncomeStatus::Review)
        } else {
            None
        }
    }
}

/// Normalized KYC evaluator record.
///
/// `Default` is the all-unset record substituted for a missing or
/// unparseable payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycRecord {
    pub agent: Option<String>,
    pub status: Option<KycStatus>,
    pub notes: Option<String>,
}

/// Normalized fraud-risk evaluator record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudRecord {
    pub agent: Option<String>,
    pub risk_score: Option<RiskScore>,
    pub notes: Option<String>,
}

/// Normalized income evaluator record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    pub agent: Option<String>,
    pub status: Option<IncomeStatus>,
    pub notes: Option<String>,
}

/// Final triage outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Approved,
    Rejected,
}

/// The three normalized records, carried unmodified for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDetails {
    pub kyc: KycRecord,
    pub fraud: FraudRecord,
    pub income: IncomeRecord,
}

/// One decision document per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    pub outcome: Outcome,

    /// Conditions attached to the outcome (empty when unconditional).
    pub conditions: Vec<String>,

    /// Fixed per-branch summary line.
    pub summary: String,

    pub details: DecisionDetails,
}
