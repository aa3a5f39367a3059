//! Case-insensitive payload parsing and producer-label correction.
//!
//! Evaluator payloads come back as free-form JSON text produced by a
//! generation step, so property casing is not guaranteed and the
//! self-reported `agent` label is occasionally blank or replaced by a raw
//! function-call artifact (`functions.<tool>`). Parsing is explicit
//! success/failure; the aggregator maps failure to the default record.

use crate::error::{DomainError, Result};
use crate::producer::ProducerId;
use crate::record::{FraudRecord, IncomeRecord, IncomeStatus, KycRecord, KycStatus, RiskScore};
use serde_json::Value;

/// Prefix a generation step leaks when it echoes a tool invocation instead
/// of the evaluator name.
const RAW_CALL_PREFIX: &str = "functions.";

/// A record type one evaluator kind reports.
///
/// Each implementation knows how to parse its own schema and how to repair
/// its self-reported producer label from the transport-level identity.
pub trait EvaluatorRecord: Default {
    /// Parse a payload, matching property names case-insensitively.
    fn parse(text: &str) -> Result<Self>;

    fn agent(&self) -> Option<&str>;

    fn set_agent(&mut self, label: &str);

    /// Overwrite the self-reported label with the transport identity when it
    /// is blank or carries a raw function-call artifact.
    fn correct_producer(&mut self, transport: ProducerId) {
        let corrupted = match self.agent() {
            None => true,
            Some(agent) => {
                let agent = agent.trim();
                agent.is_empty() || starts_with_ignore_case(agent, RAW_CALL_PREFIX)
            }
        };
        if corrupted {
            self.set_agent(transport.label());
        }
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Look up an object field by case-insensitive name.
pub fn field_ci<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .as_object()?
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, field)| field)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    field_ci(value, key)?.as_str().map(str::to_string)
}

fn payload_object(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(DomainError::NotAnObject)
    }
}

impl EvaluatorRecord for KycRecord {
    fn parse(text: &str) -> Result<Self> {
        let value = payload_object(text)?;
        Ok(Self {
            agent: string_field(&value, "agent"),
            status: string_field(&value, "status")
                .as_deref()
                .and_then(KycStatus::from_label),
            notes: string_field(&value, "notes"),
        })
    }

    fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    fn set_agent(&mut self, label: &str) {
        self.agent = Some(label.to_string());
    }
}

impl EvaluatorRecord for FraudRecord {
    fn parse(text: &str) -> Result<Self> {
        let value = payload_object(text)?;
        Ok(Self {
            agent: string_field(&value, "agent"),
            risk_score: string_field(&value, "riskScore")
                .as_deref()
                .and_then(RiskScore::from_label),
            notes: string_field(&value, "notes"),
        })
    }

    fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    fn set_agent(&mut self, label: &str) {
        self.agent = Some(label.to_string());
    }
}

impl EvaluatorRecord for IncomeRecord {
    fn parse(text: &str) -> Result<Self> {
        let value = payload_object(text)?;
        Ok(Self {
            agent: string_field(&value, "agent"),
            status: string_field(&value, "status")
                .as_deref()
                .and_then(IncomeStatus::from_label),
            notes: string_field(&value, "notes"),
        })
    }

    fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    fn set_agent(&mut self, label: &str) {
        self.agent = Some(label.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_property_names_case_insensitively() {
        let record =
            FraudRecord::parse(r#"{"AGENT":"Fraud","RISKSCORE":"medium","Notes":"thresholds"}"#)
                .unwrap();
        assert_eq!(record.agent.as_deref(), Some("Fraud"));
        assert_eq!(record.risk_score, Some(RiskScore::Medium));
        assert_eq!(record.notes.as_deref(), Some("thresholds"));
    }

    #[test]
    fn test_parse_unknown_verdict_leaves_field_unset() {
        let record = KycRecord::parse(r#"{"agent":"KYC","status":"Maybe","notes":""}"#).unwrap();
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_parse_malformed_payload_is_an_error_not_a_panic() {
        assert!(KycRecord::parse("not json at all").is_err());
        assert!(IncomeRecord::parse(r#"["an","array"]"#).is_err());
    }

    #[test]
    fn test_missing_fields_parse_to_unset() {
        let record = IncomeRecord::parse("{}").unwrap();
        assert_eq!(record, IncomeRecord::default());
    }

    #[test]
    fn test_correct_producer_fixes_blank_label() {
        let mut record = KycRecord {
            agent: Some("   ".to_string()),
            ..Default::default()
        };
        record.correct_producer(ProducerId::Kyc);
        assert_eq!(record.agent.as_deref(), Some("KYC"));
    }

    #[test]
    fn test_correct_producer_fixes_raw_call_artifact() {
        let mut record = FraudRecord {
            agent: Some("functions.score_fraud_risk".to_string()),
            risk_score: Some(RiskScore::Low),
            notes: None,
        };
        record.correct_producer(ProducerId::Fraud);
        assert_eq!(record.agent.as_deref(), Some("Fraud"));
        // Verdict is untouched by the correction.
        assert_eq!(record.risk_score, Some(RiskScore::Low));
    }

    #[test]
    fn test_correct_producer_keeps_honest_label() {
        let mut record = IncomeRecord {
            agent: Some("Income".to_string()),
            status: Some(IncomeStatus::Sufficient),
            notes: None,
        };
        record.correct_producer(ProducerId::Income);
        assert_eq!(record.agent.as_deref(), Some("Income"));
    }
}
