//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged on top
//! of the configuration file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Watches the certstream feed and posts matching certificates to Slack.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Regular expression matched against certificate domains.
    /// Overrides DOMAIN_PATTERN.
    #[arg(long, value_name = "REGEX")]
    pub domain_pattern: Option<String>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(pattern) = &self.domain_pattern {
            dict.insert("domain_pattern".into(), Value::from(pattern.clone()));
        }

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "ctwatch",
            "--config",
            "/etc/ctwatch.toml",
            "--domain-pattern",
            r"\.example\.com$",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/etc/ctwatch.toml")));
        assert_eq!(cli.domain_pattern.as_deref(), Some(r"\.example\.com$"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_provider_only_sets_given_flags() {
        let cli = Cli {
            log_level: Some("warn".to_string()),
            ..Cli::default()
        };
        let data = cli.data().unwrap();
        let dict = &data[&Profile::Default];

        assert_eq!(dict.len(), 1);
        assert_eq!(dict["log_level"].as_str(), Some("warn"));
    }
}
