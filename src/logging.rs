//! Log subscriber setup
//!
//! `RUST_LOG` takes precedence when set; otherwise the crate logs at the
//! level from [`FunctionConfig::log_level`].

use crate::config::FunctionConfig;
use crate::{EchoError, Result};
use tracing_subscriber::EnvFilter;

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain lines without timestamps or colors; CloudWatch adds ingestion time
    Lambda,
    /// Colored, timestamped lines for a terminal
    Terminal,
}

/// Builds the filter for `config`
pub fn env_filter(config: &FunctionConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("echo_lambda={}", config.log_level)))
}

/// Installs the global subscriber
pub fn init(config: &FunctionConfig, format: LogFormat) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config));

    let installed = match format {
        LogFormat::Lambda => builder
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .try_init(),
        LogFormat::Terminal => builder.try_init(),
    };

    installed.map_err(|e| EchoError::Config(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_env_filter_uses_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = FunctionConfig {
            log_level: LevelFilter::DEBUG,
            ..Default::default()
        };
        assert_eq!(env_filter(&config).to_string(), "echo_lambda=debug");
    }
}
