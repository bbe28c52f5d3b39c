//! # Gemini Suggester
//!
//! Calls the Gemini `generateContent` REST endpoint.
//!
//! ```text
//! suggest_*()
//!   │
//!   ├── no API key ──────────────────────────► Suggestion::NotConfigured
//!   │
//!   ▼
//! POST {endpoint}/v1beta/models/{model}:generateContent
//!   header  x-goog-api-key: <key>
//!   body    { "contents": [{ "parts": [{ "text": <prompt> }] }] }
//!   │
//!   ├── transport / status / empty body ──────► Suggestion::Failed(<message>)
//!   ▼
//! candidates[0].content.parts[*].text ────────► Suggestion::Text
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};
use crate::prompts::{description_prompt, TERMS_PROMPT};
use crate::suggester::{Suggester, Suggestion, DESCRIPTION_FAILED_MESSAGE, TERMS_FAILED_MESSAGE};

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined.
    pub(crate) fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// =============================================================================
// Suggester
// =============================================================================

/// HTTP suggester backed by Gemini.
#[derive(Debug, Clone)]
pub struct GeminiSuggester {
    config: AssistConfig,
    client: reqwest::Client,
}

impl GeminiSuggester {
    pub fn new(config: AssistConfig) -> AssistResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        info!(
            model = %config.model,
            configured = config.is_configured(),
            "AI suggester ready"
        );
        Ok(GeminiSuggester { config, client })
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    async fn generate(&self, prompt: &str) -> AssistResult<String> {
        let key = self.config.api_key().ok_or(AssistError::NotConfigured)?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, prompt_len = prompt.len(), "Requesting suggestion");
        let response = self
            .client
            .post(self.config.generate_url())
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(AssistError::EmptyResponse)
    }

    async fn suggest(&self, prompt: &str, failure_message: &str) -> Suggestion {
        match self.generate(prompt).await {
            Ok(text) => Suggestion::Text(text),
            Err(AssistError::NotConfigured) => Suggestion::NotConfigured,
            Err(err) => {
                error!(error = %err, "Suggestion failed");
                Suggestion::Failed(failure_message.to_string())
            }
        }
    }
}

#[async_trait]
impl Suggester for GeminiSuggester {
    async fn suggest_description(&self, brief: &str) -> Suggestion {
        self.suggest(&description_prompt(brief), DESCRIPTION_FAILED_MESSAGE)
            .await
    }

    async fn suggest_terms(&self) -> Suggestion {
        self.suggest(TERMS_PROMPT, TERMS_FAILED_MESSAGE).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Tvorba "},{"text":"webu."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Tvorba webu."));
    }

    #[test]
    fn test_response_without_text() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(response.text(), None);

        let response: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "ahoj" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "contents": [{ "parts": [{ "text": "ahoj" }] }] })
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let suggester = GeminiSuggester::new(AssistConfig::default()).unwrap();
        assert_eq!(suggester.suggest_terms().await, Suggestion::NotConfigured);
        assert_eq!(
            suggester.suggest_description("web").await,
            Suggestion::NotConfigured
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_failure_message() {
        let config = AssistConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            ..AssistConfig::default().with_api_key("test-key")
        };
        let suggester = GeminiSuggester::new(config).unwrap();

        assert_eq!(
            suggester.suggest_description("web").await,
            Suggestion::Failed(DESCRIPTION_FAILED_MESSAGE.to_string())
        );
        assert_eq!(
            suggester.suggest_terms().await,
            Suggestion::Failed(TERMS_FAILED_MESSAGE.to_string())
        );
    }
}
