//! # Assist Commands
//!
//! Thin wrappers: a suggestion never fails, so these return the outcome
//! as-is for the front end to display.

use tracing::debug;

use nabidka_assist::{Suggester, Suggestion};

pub async fn suggest_description(suggester: &dyn Suggester, brief: &str) -> Suggestion {
    debug!(len = brief.len(), "Suggesting description");
    suggester.suggest_description(brief).await
}

pub async fn suggest_terms(suggester: &dyn Suggester) -> Suggestion {
    debug!("Suggesting terms");
    suggester.suggest_terms().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nabidka_assist::DESCRIPTION_FAILED_MESSAGE;

    struct Echo;

    #[async_trait]
    impl Suggester for Echo {
        async fn suggest_description(&self, brief: &str) -> Suggestion {
            if brief.is_empty() {
                Suggestion::Failed(DESCRIPTION_FAILED_MESSAGE.to_string())
            } else {
                Suggestion::Text(brief.to_uppercase())
            }
        }

        async fn suggest_terms(&self) -> Suggestion {
            Suggestion::NotConfigured
        }
    }

    #[tokio::test]
    async fn test_outcomes_pass_through() {
        assert_eq!(
            suggest_description(&Echo, "web").await,
            Suggestion::Text("WEB".into())
        );
        assert_eq!(
            suggest_description(&Echo, "").await.display_text(),
            DESCRIPTION_FAILED_MESSAGE
        );
        assert_eq!(suggest_terms(&Echo).await, Suggestion::NotConfigured);
    }
}
