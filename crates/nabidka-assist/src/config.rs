//! Suggester configuration.

use std::time::Duration;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Gemini REST API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Settings for [`crate::GeminiSuggester`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssistConfig {
    /// `None` or blank means the feature is not configured.
    pub api_key: Option<String>,

    pub model: String,

    /// Base URL, without a trailing path.
    pub endpoint: String,

    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for AssistConfig {
    fn default() -> Self {
        AssistConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl AssistConfig {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// `{endpoint}/v1beta/models/{model}:generateContent`
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_is_not_configured() {
        assert!(!AssistConfig::default().is_configured());
        assert!(!AssistConfig::default().with_api_key("   ").is_configured());
        assert!(AssistConfig::default().with_api_key("k").is_configured());
    }

    #[test]
    fn test_generate_url() {
        let config = AssistConfig {
            endpoint: "http://localhost:8080/".to_string(),
            ..AssistConfig::default()
        };
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
