// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, defaults, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitGenius

//! Environment-based configuration management for production deployment

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// API key value the web client ships as a placeholder; treated as unset
const PLACEHOLDER_API_KEY: &str = "default_key";

/// Built-in defaults used when the corresponding variable is absent
mod defaults {
    pub const HTTP_HOST: &str = "127.0.0.1";
    pub const HTTP_PORT: u16 = 8080;
    pub const LOG_LEVEL: &str = "info";
    pub const CORS_ORIGINS: &str = "*";
    pub const RATE_LIMIT_ENABLED: bool = true;
}

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Operational messages
    #[default]
    Info,
    /// Developer diagnostics
    Debug,
    /// Everything, including per-request noise
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        })
    }
}

/// LLM provider connection settings
///
/// The API key is `None` when the variable is absent, blank, or still the
/// web client's placeholder value. Without a key the server runs with
/// generation disabled and fallback behavior everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider API key, absent when AI generation is disabled
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Chat completions base URL
    pub base_url: String,
    /// Model requested for completions
    pub model: String,
}

impl LlmConfig {
    fn from_env() -> Self {
        Self {
            api_key: sanitize_api_key(env::var("OPENAI_API_KEY").ok()),
            base_url: env_var_or("FITGENIUS_LLM_BASE_URL", DEFAULT_BASE_URL),
            model: env_var_or("FITGENIUS_LLM_MODEL", DEFAULT_MODEL),
        }
    }

    /// Whether a usable API key is present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
        }
    }
}

/// Rate limiting configuration
///
/// Per-tier limits are fixed; the switch exists so test deployments can
/// turn enforcement off wholesale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting on the public API surface
    pub enabled: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::RATE_LIMIT_ENABLED,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP listener binds to
    pub http_host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
    /// LLM provider configuration
    pub llm: LlmConfig,
    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable is present but
    /// unparseable, or when validation fails.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_host: env_var_or("FITGENIUS_HTTP_HOST", defaults::HTTP_HOST),
            http_port: parse_var("FITGENIUS_HTTP_PORT", defaults::HTTP_PORT)?,
            log_level: LogLevel::from_str_or_default(&env_var_or(
                "FITGENIUS_LOG_LEVEL",
                defaults::LOG_LEVEL,
            )),
            cors_origins: parse_origins(&env_var_or(
                "FITGENIUS_CORS_ORIGINS",
                defaults::CORS_ORIGINS,
            )),
            llm: LlmConfig::from_env(),
            rate_limit: RateLimitConfig {
                enabled: parse_var("FITGENIUS_RATE_LIMIT_ENABLED", defaults::RATE_LIMIT_ENABLED)?,
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a value is structurally invalid.
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(AppError::config("FITGENIUS_HTTP_PORT must be nonzero"));
        }
        if self.cors_origins.is_empty() {
            return Err(AppError::config(
                "FITGENIUS_CORS_ORIGINS must name at least one origin or be *",
            ));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(AppError::config("FITGENIUS_LLM_BASE_URL must not be empty"));
        }
        if self.llm.model.trim().is_empty() {
            return Err(AppError::config("FITGENIUS_LLM_MODEL must not be empty"));
        }
        Ok(())
    }

    /// Socket address string the HTTP listener binds to
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitGenius Server Configuration:\n\
             - HTTP Address: {}\n\
             - Log Level: {}\n\
             - CORS Origins: {}\n\
             - LLM Provider: {}\n\
             - LLM Model: {}\n\
             - Rate Limiting: {}",
            self.listen_addr(),
            self.log_level,
            self.cors_origins.join(", "),
            if self.llm.is_configured() {
                "Configured"
            } else {
                "Disabled (fallback responses)"
            },
            self.llm.model,
            if self.rate_limit.enabled {
                "Enabled"
            } else {
                "Disabled"
            },
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: defaults::HTTP_HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            log_level: LogLevel::default(),
            cors_origins: vec!["*".to_owned()],
            llm: LlmConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get environment variable parsed into `T`, or the default when absent
fn parse_var<T: std::str::FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("Invalid {key} value: {raw}"))),
        Err(_) => Ok(default),
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Drop blank and placeholder API keys
fn sanitize_api_key(raw: Option<String>) -> Option<String> {
    raw.map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
}
