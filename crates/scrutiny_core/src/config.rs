//! Core configuration.
//!
//! # Responsibility
//! - Describe logging, viewer and essay-provider settings in one JSON shape.
//! - Validate values once at load time so later code can trust them.
//!
//! # Invariants
//! - Every section has defaults; an empty JSON object is a valid config.
//! - API keys are never part of the config; only the env var name is.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const DEFAULT_HOVER_GRACE_MS: u64 = 150;
const MAX_HOVER_GRACE_MS: u64 = 5_000;
const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "deepseek-chat";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2000;
const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert essay writer. Write a well-structured, \
engaging essay on the given topic. Include an introduction, body paragraphs, and a conclusion.";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    pub logging: LoggingConfig,
    pub viewer: ViewerConfig,
    pub provider: ProviderConfig,
}

/// Logging bootstrap settings. `log_dir = None` disables file logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            log_dir: None,
        }
    }
}

/// Document viewer behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Delay between pointer leaving a highlight/popup and the popup closing.
    pub hover_grace_ms: u64,
}

impl ViewerConfig {
    pub fn hover_grace(&self) -> Duration {
        Duration::from_millis(self.hover_grace_ms)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            hover_grace_ms: DEFAULT_HOVER_GRACE_MS,
        }
    }
}

/// Chat-completions provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system_prompt: String,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
}

impl ProviderConfig {
    /// Reads the API key from the configured environment variable.
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(self.api_key_env.as_str())
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

/// Configuration load/validation failures.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "config parse failed: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl CoreConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::logging::normalize_level(self.logging.level.as_str()).map_err(|err| {
            ConfigError::Invalid {
                field: "logging.level",
                reason: err.to_string(),
            }
        })?;
        if let Some(dir) = self.logging.log_dir.as_deref() {
            crate::logging::normalize_log_dir(dir).map_err(|err| ConfigError::Invalid {
                field: "logging.log_dir",
                reason: err.to_string(),
            })?;
        }
        if self.viewer.hover_grace_ms > MAX_HOVER_GRACE_MS {
            return Err(ConfigError::Invalid {
                field: "viewer.hover_grace_ms",
                reason: format!("must be <= {MAX_HOVER_GRACE_MS}"),
            });
        }
        if self.provider.api_url.trim().is_empty() {
            return Err(invalid_blank("provider.api_url"));
        }
        if self.provider.model.trim().is_empty() {
            return Err(invalid_blank("provider.model"));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err(invalid_blank("provider.api_key_env"));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::Invalid {
                field: "provider.temperature",
                reason: format!("must be within 0.0..=2.0, got {}", self.provider.temperature),
            });
        }
        if self.provider.max_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "provider.max_tokens",
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

fn invalid_blank(field: &'static str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: "must not be blank".to_string(),
    }
}
