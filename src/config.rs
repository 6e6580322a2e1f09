//! Configuration management for ctwatch
//!
//! The `Config` struct is assembled with `figment` from, in increasing
//! precedence: built-in defaults, an optional TOML file, environment
//! variables, and command-line arguments. It is validated once at startup.

use crate::cli::Cli;
use crate::matching::{DomainMatcher, PatternError};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map, Value},
    Figment, Metadata, Profile, Provider,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the Slack incoming webhook URL.
pub const SLACK_WEBHOOK_URL_VAR: &str = "SLACK_WEBHOOK_URL";
/// Environment variable holding the domain regex.
pub const DOMAIN_PATTERN_VAR: &str = "DOMAIN_PATTERN";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid SLACK_WEBHOOK_URL: {0}")]
    InvalidUrl(String),
    #[error("invalid DOMAIN_PATTERN: {0}")]
    InvalidPattern(#[from] PatternError),
    #[error("slack_timeout_seconds must be greater than zero")]
    ZeroTimeout,
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level, used when `RUST_LOG` is not set.
    pub log_level: String,
    /// The Slack incoming webhook that receives notifications.
    pub slack_webhook_url: String,
    /// The regular expression domains are matched against.
    pub domain_pattern: String,
    /// Timeout for a single webhook request.
    pub slack_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            slack_webhook_url: String::new(),
            domain_pattern: String::new(),
            slack_timeout_seconds: 10,
        }
    }
}

impl Config {
    /// Loads and validates the configuration.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let config = Self::figment(cli).extract::<Config>().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// The layered sources, without extraction or validation.
    pub fn figment(cli: &Cli) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = &cli.config {
            figment = figment.merge(Toml::file(path));
        }
        figment
            // e.g. CTWATCH_LOG_LEVEL=debug
            .merge(Env::prefixed("CTWATCH_").only(&["log_level", "slack_timeout_seconds"]))
            .merge(RequiredEnv)
            .merge(cli.clone())
    }

    /// Checks that both required values are present and usable.
    ///
    /// The pattern is only checked for presence here; it is compiled once,
    /// by `matcher`, when the app is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slack_webhook_url.is_empty() {
            return Err(ConfigError::Missing(SLACK_WEBHOOK_URL_VAR));
        }
        let url =
            Url::parse(&self.slack_webhook_url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }

        if self.domain_pattern.is_empty() {
            return Err(ConfigError::Missing(DOMAIN_PATTERN_VAR));
        }
        if self.slack_timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Compiles `domain_pattern`.
    pub fn matcher(&self) -> Result<DomainMatcher, ConfigError> {
        Ok(DomainMatcher::new(&self.domain_pattern)?)
    }
}

/// The two unprefixed variables, taken verbatim.
///
/// `Env` would parse values, turning a pattern like `[a-z]+` into an array.
struct RequiredEnv;

impl Provider for RequiredEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named("Environment Variables")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut dict = Dict::new();
        for (var, key) in [
            (SLACK_WEBHOOK_URL_VAR, "slack_webhook_url"),
            (DOMAIN_PATTERN_VAR, "domain_pattern"),
        ] {
            if let Ok(value) = std::env::var(var) {
                dict.insert(key.into(), Value::from(value));
            }
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
