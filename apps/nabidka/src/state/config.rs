//! # Application Configuration
//!
//! ## Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`config.toml` in the platform config directory)
//! 3. Environment variables (`NABIDKA_*`, `API_KEY`)
//!
//! ## Example
//! ```toml
//! [storage]
//! database_path = "/home/jan/.local/share/nabidka/nabidka.db"
//!
//! [export]
//! output_dir = "/home/jan/Dokumenty/Nabidky"
//! settle_delay_ms = 100
//! render_timeout_secs = 30
//!
//! [sender]
//! from_name = "Jan Novák"
//! from_address = "Dlouhá 5\n110 00 Praha"
//! tax_rate = 21.0
//! terms = "Splatnost faktury je 14 dní."
//!
//! [assist]
//! api_key = "..."
//! model = "gemini-2.5-flash"
//! timeout_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use nabidka_assist::{AssistConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use nabidka_core::QuoteDefaults;

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "nabidka.db";

/// File name of the config inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Defaults to `nabidka.db` in the platform data directory.
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Defaults to the working directory.
    pub output_dir: Option<PathBuf>,

    /// Pause between a committed render and its capture.
    pub settle_delay_ms: u64,

    /// Layout that takes longer than this fails the export.
    pub render_timeout_secs: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: None,
            settle_delay_ms: 100,
            render_timeout_secs: 30,
        }
    }
}

/// Sender defaults pre-filled into new quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SenderSettings {
    pub from_name: String,
    pub from_address: String,
    pub tax_rate: f64,
    pub terms: String,
}

impl Default for SenderSettings {
    fn default() -> Self {
        let defaults = QuoteDefaults::default();
        SenderSettings {
            from_name: defaults.from_name,
            from_address: defaults.from_address,
            tax_rate: defaults.tax_rate,
            terms: defaults.terms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AssistSettings {
    fn default() -> Self {
        AssistSettings {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub sender: SenderSettings,

    #[serde(default)]
    pub assist: AssistSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; an unparsable one or invalid values are.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`] with an explicit environment lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides(env)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let rate = self.sender.tax_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sender.tax_rate must be a non-negative number, got {rate}"
            )));
        }

        if self.assist.model.trim().is_empty() {
            return Err(ConfigError::Invalid("assist.model must not be empty".into()));
        }

        if !self.assist.endpoint.starts_with("http://") && !self.assist.endpoint.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "assist.endpoint must start with http:// or https://, got: {}",
                self.assist.endpoint
            )));
        }

        if self.export.render_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "export.render_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.assist.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "assist.timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides<F>(&mut self, env: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env("NABIDKA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = env("NABIDKA_EXPORT_DIR") {
            self.export.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(ms) = env("NABIDKA_SETTLE_MS") {
            self.export.settle_delay_ms = ms.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("NABIDKA_SETTLE_MS must be milliseconds, got: {ms}"))
            })?;
        }

        if let Some(key) = env("API_KEY").or_else(|| env("GEMINI_API_KEY")) {
            debug!("Using AI API key from environment");
            self.assist.api_key = Some(key);
        }

        if let Some(model) = env("NABIDKA_AI_MODEL") {
            self.assist.model = model;
        }

        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("cz", "nabidka", "nabidka")
    }

    /// `config.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Derived settings
    // =========================================================================

    /// Database file, falling back to the platform data directory and then
    /// the working directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.storage.database_path {
            return path.clone();
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
    }

    pub fn export_dir(&self) -> &Path {
        self.export
            .output_dir
            .as_deref()
            .unwrap_or_else(|| Path::new("."))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.export.settle_delay_ms)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.export.render_timeout_secs)
    }

    pub fn quote_defaults(&self) -> QuoteDefaults {
        QuoteDefaults {
            from_name: self.sender.from_name.clone(),
            from_address: self.sender.from_address.clone(),
            tax_rate: self.sender.tax_rate,
            terms: self.sender.terms.clone(),
        }
    }

    pub fn assist_config(&self) -> AssistConfig {
        AssistConfig {
            api_key: self.assist.api_key.clone(),
            model: self.assist.model.clone(),
            endpoint: self.assist.endpoint.clone(),
            timeout: Duration::from_secs(self.assist.timeout_secs),
        }
    }
}
