use crate::reporting::rules::{
    ClassificationRules, DEFAULT_AWAITING_RETURN_TOKENS, DEFAULT_DONE_MARKERS,
};
use std::env;
use std::fmt;

const AWAITING_RETURN_VAR: &str = "REPORT_AWAITING_RETURN_TOKENS";
const DONE_MARKERS_VAR: &str = "REPORT_DONE_MARKERS";

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Level used when `APP_LOG_LEVEL` is unset.
    pub fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "info",
            Self::Test | Self::Production => "warn",
        }
    }
}

/// Top-level configuration for report runs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub classification: ClassificationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        let awaiting_return_tokens =
            tokens_from_env(AWAITING_RETURN_VAR, DEFAULT_AWAITING_RETURN_TOKENS)?;
        let done_markers = tokens_from_env(DONE_MARKERS_VAR, DEFAULT_DONE_MARKERS)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            classification: ClassificationConfig {
                awaiting_return_tokens,
                done_markers,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Rule-table tokens. The awaiting-return pattern lives here so a
/// misspelled token in a board's list names can be matched without a
/// code change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationConfig {
    pub awaiting_return_tokens: Vec<String>,
    pub done_markers: Vec<String>,
}

impl ClassificationConfig {
    pub fn rules(&self) -> ClassificationRules {
        ClassificationRules::from_tokens(&self.awaiting_return_tokens, &self.done_markers)
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            awaiting_return_tokens: to_owned(DEFAULT_AWAITING_RETURN_TOKENS),
            done_markers: to_owned(DEFAULT_DONE_MARKERS),
        }
    }
}

fn tokens_from_env(variable: &'static str, defaults: &[&str]) -> Result<Vec<String>, ConfigError> {
    let Ok(raw) = env::var(variable) else {
        return Ok(to_owned(defaults));
    };

    let tokens: Vec<String> = raw.split(',').map(|token| token.trim().to_string()).collect();
    if tokens.iter().any(String::is_empty) {
        return Err(ConfigError::EmptyRuleTokens { variable });
    }

    Ok(tokens)
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    EmptyRuleTokens { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRuleTokens { variable } => write!(
                f,
                "{variable} must be a comma-separated list of non-empty tokens"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
