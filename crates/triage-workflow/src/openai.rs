//! Azure/OpenAI-compatible chat-completions backend for [`Generator`].

use crate::generate::{GenerateError, GenerationRequest, Generator};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

const API_VERSION: &str = "2024-10-21";

/// Connection settings for an Azure OpenAI deployment.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,

    /// Deployment (model) name.
    pub deployment: String,

    /// API key sent in the `api-key` header.
    pub api_key: String,
}

/// Chat-completions client implementing the generation capability.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Result<Self, GenerateError> {
        let http_client = reqwest::Client::builder()
            .user_agent("triage-workflow/0.1.0")
            .build()?;

        Ok(OpenAiGenerator {
            config,
            http_client,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            API_VERSION
        )
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let user_content = format!(
            "Credit application:\n{}\n\nDeterministic tool verdict: {}",
            request.application_text, request.tool_verdict
        );
        let body = json!({
            "messages": [
                { "role": "system", "content": request.instructions },
                { "role": "user", "content": user_content },
            ],
        });

        debug!(producer = %request.producer, "Requesting completion");

        let response = self
            .http_client
            .post(self.completions_url())
            .header("api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(GenerateError::Empty);
        }
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_joins_endpoint_and_deployment() {
        let generator = OpenAiGenerator::new(OpenAiConfig {
            endpoint: "https://example.openai.azure.com/".to_string(),
            deployment: "gpt-4.1-mini".to_string(),
            api_key: "secret".to_string(),
        })
        .unwrap();

        assert_eq!(
            generator.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4.1-mini/chat/completions?api-version=2024-10-21"
        );
    }
}
