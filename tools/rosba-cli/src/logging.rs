//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// tables and `--json` output.
pub fn init(verbose: bool, json: bool, config: &LoggingConfig) {
    let filter = build_env_filter(verbose, config);
    let registry = tracing_subscriber::registry().with(filter);

    let result = match effective_format(json, config) {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Human => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}

fn build_env_filter(verbose: bool, config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},hyper=warn,reqwest=warn,rustls=warn",
            default_level(verbose, config)
        ))
    })
}

fn default_level(verbose: bool, config: &LoggingConfig) -> &str {
    if verbose {
        "debug"
    } else {
        &config.level
    }
}

fn effective_format(json: bool, config: &LoggingConfig) -> LogFormat {
    if json {
        LogFormat::Json
    } else {
        config.format
    }
}
