//! Generation capability contract.
//!
//! Evaluators consume a text-generation collaborator only through the
//! [`Generator`] trait: instructions plus a deterministic tool verdict in,
//! structured JSON text out. The real backend is [`crate::openai`]; tests
//! use [`crate::fakes::ScriptedGenerator`].

use async_trait::async_trait;
use thiserror::Error;
use triage_domain::ProducerId;

/// One generation round trip on behalf of an evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Evaluator asking for the completion.
    pub producer: ProducerId,

    /// System instructions, including the required output schema.
    pub instructions: String,

    /// Raw application text under evaluation.
    pub application_text: String,

    /// Verdict the deterministic tool already produced.
    pub tool_verdict: String,
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Generation transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed completion payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Generator returned an empty completion")]
    Empty,
}

/// Text-generation capability wrapped around an evaluator's tool verdict.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}
