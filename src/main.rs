//! ctwatch - Certificate Transparency watcher
//!
//! Streams newly issued certificates from certstream and posts the ones
//! whose domains match a pattern to a Slack webhook.

use clap::Parser;
use ctwatch::{app::App, cli::Cli, config::Config};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Logging is not configured yet; fall back to the defaults.
        tracing_subscriber::fmt().init();
        error!("{}", err);
        std::process::exit(1);
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("ctwatch starting up...");
    info!("Log Level: {}", config.log_level);
    info!("Domain Pattern: {}", config.domain_pattern);
    info!("Slack Timeout: {}s", config.slack_timeout_seconds);

    let app = App::builder(config).build().unwrap_or_else(|err| {
        error!("Failed to initialize: {:#}", err);
        std::process::exit(1);
    });

    if let Err(err) = app.run().await {
        error!("{}", err);
        std::process::exit(1);
    }
}
