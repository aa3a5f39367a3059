//! Evaluator identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three evaluators expected to report on every application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProducerId {
    Kyc,
    Fraud,
    Income,
}

impl ProducerId {
    /// Every producer the aggregator waits on, in fusion order.
    pub const ALL: [ProducerId; 3] = [ProducerId::Kyc, ProducerId::Fraud, ProducerId::Income];

    /// Wire label the evaluator tags its messages with.
    pub fn label(self) -> &'static str {
        match self {
            ProducerId::Kyc => "KYC",
            ProducerId::Fraud => "Fraud",
            ProducerId::Income => "Income",
        }
    }

    /// Case-insensitive match against a self-reported label.
    pub fn matches_label(self, label: &str) -> bool {
        self.label().eq_ignore_ascii_case(label.trim())
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
