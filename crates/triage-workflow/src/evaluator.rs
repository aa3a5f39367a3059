//! Evaluators: a deterministic scoring tool plus a generation step.
//!
//! Each evaluator runs its tool locally, then asks the generator to wrap the
//! verdict in the structured JSON the aggregator expects. The instructions
//! demand an exact self-label, but the generation step may corrupt it; the
//! aggregator repairs that downstream.

use crate::generate::{GenerationRequest, Generator};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use triage_domain::{parse::field_ci, tools, ApplicationRequest, EvaluatorMessage, ProducerId};

const KYC_INSTRUCTIONS: &str = "You validate identity. The deterministic KYC tool already \
    validated the CPF; its verdict is provided. Return ONLY a JSON object with keys: \
    agent (must be exactly \"KYC\"), status (string: Approved|Rejected|Review), notes (string).";

const FRAUD_INSTRUCTIONS: &str = "You assess fraud risk. The deterministic fraud tool already \
    scored the application; its verdict is provided. Return ONLY a JSON object with keys: \
    agent (must be exactly \"Fraud\"), riskScore (string: Low|Medium|High|Review), notes (string).";

const INCOME_INSTRUCTIONS: &str = "You assess income capacity. The deterministic income tool \
    already scored the application; its verdict is provided. Return ONLY a JSON object with keys: \
    agent (must be exactly \"Income\"), status (string: Sufficient|Insufficient|Review), notes (string).";

/// One evaluator in the fan-out: producer identity, instructions, tool.
pub struct Evaluator {
    producer: ProducerId,
    instructions: &'static str,
    tool: fn(&str) -> String,
    generator: Arc<dyn Generator>,
}

impl Evaluator {
    /// Identity verification evaluator.
    pub fn kyc(generator: Arc<dyn Generator>) -> Self {
        Self {
            producer: ProducerId::Kyc,
            instructions: KYC_INSTRUCTIONS,
            tool: kyc_tool,
            generator,
        }
    }

    /// Fraud-risk scoring evaluator.
    pub fn fraud(generator: Arc<dyn Generator>) -> Self {
        Self {
            producer: ProducerId::Fraud,
            instructions: FRAUD_INSTRUCTIONS,
            tool: fraud_tool,
            generator,
        }
    }

    /// Income-sufficiency scoring evaluator.
    pub fn income(generator: Arc<dyn Generator>) -> Self {
        Self {
            producer: ProducerId::Income,
            instructions: INCOME_INSTRUCTIONS,
            tool: income_tool,
            generator,
        }
    }

    pub fn producer(&self) -> ProducerId {
        self.producer
    }

    /// Run the tool, then the generation step; tag the output with this
    /// evaluator's producer id.
    ///
    /// A generation failure or blank completion yields no message at all:
    /// the aggregation gate simply keeps waiting.
    pub async fn evaluate(&self, request: &ApplicationRequest) -> Option<EvaluatorMessage> {
        let verdict = (self.tool)(&request.text);
        debug!(producer = %self.producer, verdict = %verdict, "Tool verdict");

        let generation = GenerationRequest {
            producer: self.producer,
            instructions: self.instructions.to_string(),
            application_text: request.text.clone(),
            tool_verdict: verdict,
        };

        match self.generator.generate(&generation).await {
            Ok(text) if !text.trim().is_empty() => {
                Some(EvaluatorMessage::new(self.producer, text))
            }
            Ok(_) => {
                warn!(producer = %self.producer, "Generator returned blank text; dropping message");
                None
            }
            Err(err) => {
                warn!(producer = %self.producer, error = %err, "Generation failed; dropping message");
                None
            }
        }
    }
}

fn kyc_tool(application_json: &str) -> String {
    let cpf = serde_json::from_str::<Value>(application_json)
        .ok()
        .and_then(|value| {
            field_ci(&value, "cpf")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
    match cpf {
        Some(cpf) => tools::validate_cpf(&cpf).as_str().to_string(),
        None => "Review".to_string(),
    }
}

fn fraud_tool(application_json: &str) -> String {
    tools::score_fraud_risk(application_json).as_str().to_string()
}

fn income_tool(application_json: &str) -> String {
    tools::score_income(application_json).as_str().to_string()
}
