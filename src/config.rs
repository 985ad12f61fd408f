//! Configuration management for the mentor.
//!
//! Configuration is read from environment variables (a `.env` file in the
//! working directory is loaded first by the binaries):
//! - `GROQ_API_KEY` - Required. API key for the chat-completion provider.
//! - `TAVILY_API_KEY` - Required. API key for the web-search provider.
//! - `MENTOR_MODEL` - Optional. Model identifier. Defaults to `llama-3.3-70b-versatile`.
//! - `GROQ_BASE_URL` - Optional. Defaults to `https://api.groq.com/openai/v1`.
//! - `TAVILY_BASE_URL` - Optional. Defaults to `https://api.tavily.com`.
//! - `TEMPERATURE` - Optional. Sampling temperature. Defaults to `0.7`.
//! - `MAX_TOKENS` - Optional. Max output tokens per model call. Defaults to `3000`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Per-call timeout. Defaults to `60`.
//! - `MAX_RETRIES` - Optional. Retries per model call. Defaults to `2`.
//! - `MAX_ITERATIONS` - Optional. Maximum tool-invocation rounds per exchange. Defaults to `15`.
//! - `MAX_EXECUTION_SECS` - Optional. Wall-clock budget per exchange. Defaults to `180`.
//! - `HOST` - Optional. Web server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Web server port. Defaults to `8501`.
//! - `DEV_MODE` - Optional. Shows error details in the web UI.
//! - `SESSION_IDLE_SECS` - Optional. Web sessions idle this long are dropped. Defaults to `3600`.

use std::time::Duration;
use thiserror::Error;

pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";

const DEFAULT_SESSION_IDLE_SECS: u64 = 60 * 60;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Human-readable instructions for fixing the problem.
    pub fn remediation(&self) -> String {
        match self {
            Self::MissingEnvVar(_) => format!(
                "Please create a .env file with:\n{}=gsk-your-groq-key-here\n{}=tvly-your-tavily-key-here",
                GROQ_API_KEY_VAR, TAVILY_API_KEY_VAR
            ),
            Self::InvalidValue(name, _) => {
                format!("Fix or unset the {} environment variable and restart.", name)
            }
        }
    }
}

/// Knobs for the chat-completion client.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model identifier sent with every request
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    pub base_url: String,

    pub temperature: f32,

    /// Max output tokens per call
    pub max_tokens: u32,

    /// Per-call timeout
    pub request_timeout: Duration,

    /// Retries after the first failed attempt
    pub max_retries: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            temperature: 0.7,
            max_tokens: 3000,
            request_timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }
}

/// Ceilings enforced by the tool-calling loop.
#[derive(Debug, Clone)]
pub struct LoopLimits {
    /// Maximum model rounds per exchange
    pub max_iterations: usize,

    /// Wall-clock budget per exchange
    pub max_execution_time: Duration,
}

impl Default for LoopLimits {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            max_execution_time: Duration::from_secs(180),
        }
    }
}

/// Mentor configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completion provider API key
    pub groq_api_key: String,

    /// Web-search provider API key
    pub tavily_api_key: String,

    /// Base URL of the search API
    pub tavily_base_url: String,

    pub model: ModelConfig,

    pub limits: LoopLimits,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Development mode (shows error details in the web UI)
    pub dev_mode: bool,

    /// Idle time after which a web session is dropped
    pub session_idle_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if either API key is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let groq_api_key = required_var(GROQ_API_KEY_VAR)?;
        let tavily_api_key = required_var(TAVILY_API_KEY_VAR)?;

        let defaults = ModelConfig::default();
        let model = ModelConfig {
            model: std::env::var("MENTOR_MODEL").unwrap_or(defaults.model),
            base_url: std::env::var("GROQ_BASE_URL").unwrap_or(defaults.base_url),
            temperature: parse_var("TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_var("MAX_TOKENS", defaults.max_tokens)?,
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            max_retries: parse_var("MAX_RETRIES", defaults.max_retries)?,
        };

        let limit_defaults = LoopLimits::default();
        let limits = LoopLimits {
            max_iterations: parse_var("MAX_ITERATIONS", limit_defaults.max_iterations)?,
            max_execution_time: Duration::from_secs(parse_var(
                "MAX_EXECUTION_SECS",
                limit_defaults.max_execution_time.as_secs(),
            )?),
        };
        if limits.max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let tavily_base_url = std::env::var("TAVILY_BASE_URL")
            .unwrap_or_else(|_| "https://api.tavily.com".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = parse_var("PORT", 8501u16)?;

        let dev_mode = std::env::var("DEV_MODE")
            .ok()
            .map(|v| parse_bool(&v).map_err(|e| ConfigError::InvalidValue("DEV_MODE".to_string(), e)))
            .transpose()?
            .unwrap_or(cfg!(debug_assertions));

        let session_idle_timeout = Duration::from_secs(parse_var(
            "SESSION_IDLE_SECS",
            DEFAULT_SESSION_IDLE_SECS,
        )?);
        if session_idle_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "SESSION_IDLE_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            groq_api_key,
            tavily_api_key,
            tavily_base_url,
            model,
            limits,
            host,
            port,
            dev_mode,
            session_idle_timeout,
        })
    }

    /// Create a config with custom keys and default knobs (useful for testing).
    pub fn new(groq_api_key: String, tavily_api_key: String) -> Self {
        Self {
            groq_api_key,
            tavily_api_key,
            tavily_base_url: "https://api.tavily.com".to_string(),
            model: ModelConfig::default(),
            limits: LoopLimits::default(),
            host: "127.0.0.1".to_string(),
            port: 8501,
            dev_mode: true,
            session_idle_timeout: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("Yes"), Ok(true));
        assert_eq!(parse_bool(" off "), Ok(false));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn missing_key_remediation_names_both_keys() {
        let err = ConfigError::MissingEnvVar(GROQ_API_KEY_VAR.to_string());
        let text = err.remediation();
        assert!(text.contains("GROQ_API_KEY="));
        assert!(text.contains("TAVILY_API_KEY="));
    }

    #[test]
    fn new_uses_default_knobs() {
        let config = Config::new("g".into(), "t".into());
        assert_eq!(config.model.model, "llama-3.3-70b-versatile");
        assert_eq!(config.model.max_tokens, 3000);
        assert_eq!(config.limits.max_iterations, 15);
        assert_eq!(config.limits.max_execution_time, Duration::from_secs(180));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(3600));
    }
}
