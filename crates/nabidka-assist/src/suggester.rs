//! The suggestion contract.

use async_trait::async_trait;
use serde::Serialize;

/// Shown when no API key is configured.
pub const NOT_CONFIGURED_MESSAGE: &str = "API klíč není nakonfigurován.";

/// Shown when a description suggestion fails.
pub const DESCRIPTION_FAILED_MESSAGE: &str = "Chyba při generování popisu. Zkuste to prosím znovu.";

/// Shown when a terms suggestion fails.
pub const TERMS_FAILED_MESSAGE: &str = "Chyba při generování podmínek. Zkuste to prosím znovu.";

/// Outcome of a suggestion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "camelCase")]
pub enum Suggestion {
    /// Replacement text produced by the model.
    Text(String),
    /// No credentials are configured.
    NotConfigured,
    /// The call failed; carries the message to display.
    Failed(String),
}

impl Suggestion {
    /// Text to show the user, whatever the outcome.
    pub fn display_text(&self) -> &str {
        match self {
            Suggestion::Text(text) | Suggestion::Failed(text) => text,
            Suggestion::NotConfigured => NOT_CONFIGURED_MESSAGE,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Suggestion::Text(_))
    }

    /// The produced text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            Suggestion::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Asynchronous text suggestions. Implementations never fail: every error
/// becomes a [`Suggestion`] the caller can display.
#[async_trait]
pub trait Suggester: Send + Sync {
    /// Expands a short service description into a quote line.
    async fn suggest_description(&self, brief: &str) -> Suggestion;

    /// Produces standard business terms for a quote.
    async fn suggest_terms(&self) -> Suggestion;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        assert_eq!(Suggestion::Text("Ahoj".into()).display_text(), "Ahoj");
        assert_eq!(Suggestion::NotConfigured.display_text(), NOT_CONFIGURED_MESSAGE);
        assert_eq!(
            Suggestion::Failed(TERMS_FAILED_MESSAGE.into()).display_text(),
            TERMS_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Suggestion::Text("x".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "text", "text": "x" }));

        let json = serde_json::to_value(Suggestion::NotConfigured).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "notConfigured" }));
    }
}
