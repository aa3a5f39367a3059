//! In-memory fakes for external collaborators (testing only)
//!
//! Provides `ScriptedGenerator`, a [`Generator`] that satisfies the trait
//! contract without any network dependency.

use crate::generate::{GenerateError, GenerationRequest, Generator};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use triage_domain::ProducerId;

/// Generator that replays canned completions per producer.
///
/// Producers without a script fail the call, which lets tests exercise the
/// dropped-message path.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    responses: Mutex<HashMap<ProducerId, Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion for one producer; calls consume responses in order,
    /// the last one repeating.
    pub fn respond(self, producer: ProducerId, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(producer)
            .or_default()
            .push(text.into());
        self
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&request.producer) {
            Some(queue) if queue.len() > 1 => Ok(queue.remove(0)),
            Some(queue) => queue.first().cloned().ok_or(GenerateError::Empty),
            None => Err(GenerateError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(producer: ProducerId) -> GenerationRequest {
        GenerationRequest {
            producer,
            instructions: String::new(),
            application_text: String::new(),
            tool_verdict: "Low".to_string(),
        }
    }

    #[tokio::test]
    async fn test_scripted_responses_replay_in_order_then_repeat() {
        let generator = ScriptedGenerator::new()
            .respond(ProducerId::Fraud, "first")
            .respond(ProducerId::Fraud, "second");

        assert_eq!(
            generator.generate(&request(ProducerId::Fraud)).await.unwrap(),
            "first"
        );
        assert_eq!(
            generator.generate(&request(ProducerId::Fraud)).await.unwrap(),
            "second"
        );
        assert_eq!(
            generator.generate(&request(ProducerId::Fraud)).await.unwrap(),
            "second"
        );
    }

    #[tokio::test]
    async fn test_unscripted_producer_fails() {
        let generator = ScriptedGenerator::new();
        assert!(generator.generate(&request(ProducerId::Kyc)).await.is_err());
    }
}
