//! Decision fusion policy.

use crate::record::{
    DecisionDetails, DecisionResult, FraudRecord, IncomeRecord, IncomeStatus, KycRecord,
    KycStatus, Outcome, RiskScore,
};

const APPROVED_SUMMARY: &str = "KYC approved and income sufficient; fraud risk acceptable.";
const REJECTED_SUMMARY: &str = "One or more checks failed or require manual review.";

/// Fuse the three normalized records into one decision.
///
/// Pure and deterministic:
/// - Approval requires KYC `Approved` and income `Sufficient`
/// - Fraud `Medium` attaches a manual-review condition without rejecting
/// - Fraud `High` forces rejection regardless of the other verdicts
///
/// `Review` (or an unset verdict) never satisfies a requirement; it falls
/// through the equality checks into rejection.
pub fn decide(kyc: KycRecord, fraud: FraudRecord, income: IncomeRecord) -> DecisionResult {
    let mut approved =
        kyc.status == Some(KycStatus::Approved) && income.status == Some(IncomeStatus::Sufficient);

    let mut conditions = Vec::new();
    if fraud.risk_score == Some(RiskScore::Medium) {
        conditions.push("Require manual fraud review".to_string());
    } else if fraud.risk_score == Some(RiskScore::High) {
        approved = false;
    }

    let outcome = if approved {
        Outcome::Approved
    } else {
        Outcome::Rejected
    };
    let summary = if approved {
        APPROVED_SUMMARY
    } else {
        REJECTED_SUMMARY
    };

    DecisionResult {
        outcome,
        conditions,
        summary: summary.to_string(),
        details: DecisionDetails { kyc, fraud, income },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kyc(status: Option<KycStatus>) -> KycRecord {
        KycRecord {
            agent: Some("KYC".to_string()),
            status,
            notes: None,
        }
    }

    fn fraud(risk_score: Option<RiskScore>) -> FraudRecord {
        FraudRecord {
            agent: Some("Fraud".to_string()),
            risk_score,
            notes: None,
        }
    }

    fn income(status: Option<IncomeStatus>) -> IncomeRecord {
        IncomeRecord {
            agent: Some("Income".to_string()),
            status,
            notes: None,
        }
    }

    #[test]
    fn test_all_clear_approves_without_conditions() {
        let decision = decide(
            kyc(Some(KycStatus::Approved)),
            fraud(Some(RiskScore::Low)),
            income(Some(IncomeStatus::Sufficient)),
        );
        assert_eq!(decision.outcome, Outcome::Approved);
        assert!(decision.conditions.is_empty());
        assert_eq!(
            decision.summary,
            "KYC approved and income sufficient; fraud risk acceptable."
        );
    }

    #[test]
    fn test_medium_fraud_approves_with_exactly_one_condition() {
        let decision = decide(
            kyc(Some(KycStatus::Approved)),
            fraud(Some(RiskScore::Medium)),
            income(Some(IncomeStatus::Sufficient)),
        );
        assert_eq!(decision.outcome, Outcome::Approved);
        assert_eq!(decision.conditions, vec!["Require manual fraud review"]);
    }

    #[test]
    fn test_high_fraud_forces_rejection() {
        let decision = decide(
            kyc(Some(KycStatus::Approved)),
            fraud(Some(RiskScore::High)),
            income(Some(IncomeStatus::Sufficient)),
        );
        assert_eq!(decision.outcome, Outcome::Rejected);
        assert!(decision.conditions.is_empty());
    }

    #[test]
    fn test_rejected_kyc_rejects() {
        let decision = decide(
            kyc(Some(KycStatus::Rejected)),
            fraud(Some(RiskScore::Low)),
            income(Some(IncomeStatus::Sufficient)),
        );
        assert_eq!(decision.outcome, Outcome::Rejected);
        assert_eq!(
            decision.summary,
            "One or more checks failed or require manual review."
        );
    }

    #[test]
    fn test_insufficient_income_rejects() {
        let decision = decide(
            kyc(Some(KycStatus::Approved)),
            fraud(Some(RiskScore::Low)),
            income(Some(IncomeStatus::Insufficient)),
        );
        assert_eq!(decision.outcome, Outcome::Rejected);
    }

    #[test]
    fn test_review_never_satisfies_a_requirement() {
        let decision = decide(
            kyc(Some(KycStatus::Review)),
            fraud(Some(RiskScore::Low)),
            income(Some(IncomeStatus::Review)),
        );
        assert_eq!(decision.outcome, Outcome::Rejected);

        // Fraud Review neither rejects on its own nor attaches a condition.
        let decision = decide(
            kyc(Some(KycStatus::Approved)),
            fraud(Some(RiskScore::Review)),
            income(Some(IncomeStatus::Sufficient)),
        );
        assert_eq!(decision.outcome, Outcome::Approved);
        assert!(decision.conditions.is_empty());
    }

    #[test]
    fn test_unset_verdicts_reject() {
        let decision = decide(kyc(None), fraud(None), income(None));
        assert_eq!(decision.outcome, Outcome::Rejected);
        assert!(decision.conditions.is_empty());
    }

    #[test]
    fn test_decide_is_pure() {
        let args = || {
            (
                kyc(Some(KycStatus::Approved)),
                fraud(Some(RiskScore::Medium)),
                income(Some(IncomeStatus::Sufficient)),
            )
        };
        let (k, f, i) = args();
        let first = decide(k, f, i);
        let (k, f, i) = args();
        let second = decide(k, f, i);
        assert_eq!(first, second);
    }

    #[test]
    fn test_details_carry_records_unmodified() {
        let k = kyc(Some(KycStatus::Approved));
        let f = fraud(Some(RiskScore::High));
        let i = income(Some(IncomeStatus::Sufficient));
        let decision = decide(k.clone(), f.clone(), i.clone());
        assert_eq!(decision.details.kyc, k);
        assert_eq!(decision.details.fraud, f);
        assert_eq!(decision.details.income, i);
    }

    #[test]
    fn test_decision_serializes_with_camel_case_keys() {
        let decision = decide(
            kyc(Some(KycStatus::Approved)),
            fraud(Some(RiskScore::Medium)),
            income(Some(IncomeStatus::Sufficient)),
        );
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["outcome"], "Approved");
        assert_eq!(json["conditions"][0], "Require manual fraud review");
        assert_eq!(json["details"]["fraud"]["riskScore"], "Medium");
        assert_eq!(json["details"]["kyc"]["status"], "Approved");
        assert_eq!(json["details"]["income"]["status"], "Sufficient");
    }
}
