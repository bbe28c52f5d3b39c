//! # nabidka-assist: AI Text Suggestions for Nabídka
//!
//! A narrow collaborator contract: given a short text, asynchronously
//! return replacement text or a displayable failure. Nothing here returns
//! an error to the caller.
//!
//! ## Module Organization
//!
//! - [`suggester`] - The `Suggester` trait and `Suggestion` outcome
//! - [`gemini`] - HTTP implementation against Gemini
//! - [`config`] - API key, model, endpoint, timeout
//! - [`prompts`] - Czech prompts
//! - [`error`] - Internal error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nabidka_assist::{AssistConfig, GeminiSuggester, Suggester};
//!
//! let suggester = GeminiSuggester::new(AssistConfig::default().with_api_key(key))?;
//! let terms = suggester.suggest_terms().await;
//! println!("{}", terms.display_text());
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod suggester;

pub use config::{AssistConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::{AssistError, AssistResult};
pub use gemini::GeminiSuggester;
pub use suggester::{
    Suggester, Suggestion, DESCRIPTION_FAILED_MESSAGE, NOT_CONFIGURED_MESSAGE, TERMS_FAILED_MESSAGE,
};
