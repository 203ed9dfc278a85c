use crate::{EchoError, Result};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable naming the deployment environment
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";
/// Environment variable holding the log level
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
/// Set by the Lambda service for every function
pub const FUNCTION_NAME_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";
/// Set by the Lambda service; its presence means we run under the Runtime API
pub const RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

/// Function-level configuration passed in by the deployment
///
/// The echo handler itself does not read any of this; it drives logging and
/// startup diagnostics only.
///
/// # Examples
///
/// ```
/// use echo_lambda::config::FunctionConfig;
///
/// let config = FunctionConfig::from_lookup(|name| match name {
///     "ENVIRONMENT" => Some("dev".to_string()),
///     "LOG_LEVEL" => Some("DEBUG".to_string()),
///     _ => None,
/// })
/// .unwrap();
///
/// assert_eq!(config.environment.as_deref(), Some("dev"));
/// assert_eq!(config.log_level.to_string(), "debug");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionConfig {
    /// Deployment environment, e.g. `dev` or `prod`
    pub environment: Option<String>,
    /// Maximum level emitted by the log subscriber
    pub log_level: LevelFilter,
    /// Lambda function name, when running inside Lambda
    pub function_name: Option<String>,
    /// Whether the Lambda Runtime API endpoint is available
    pub runtime_api_available: bool,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            environment: None,
            log_level: LevelFilter::INFO,
            function_name: None,
            runtime_api_available: false,
        }
    }
}

impl FunctionConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let log_level = match non_empty(LOG_LEVEL_VAR) {
            Some(level) => LevelFilter::from_str(level.trim()).map_err(|_| {
                EchoError::Config(format!("Invalid {LOG_LEVEL_VAR} value: {level:?}"))
            })?,
            None => LevelFilter::INFO,
        };

        Ok(Self {
            environment: non_empty(ENVIRONMENT_VAR),
            log_level,
            function_name: non_empty(FUNCTION_NAME_VAR),
            runtime_api_available: non_empty(RUNTIME_API_VAR).is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = FunctionConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, FunctionConfig::default());
        assert_eq!(config.log_level, LevelFilter::INFO);
        assert!(!config.runtime_api_available);
    }

    #[test]
    fn test_config_reads_deployment_vars() {
        let config = FunctionConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "prod"),
            ("LOG_LEVEL", "warn"),
            ("AWS_LAMBDA_FUNCTION_NAME", "echo-prod"),
            ("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001"),
        ]))
        .unwrap();

        assert_eq!(config.environment.as_deref(), Some("prod"));
        assert_eq!(config.log_level, LevelFilter::WARN);
        assert_eq!(config.function_name.as_deref(), Some("echo-prod"));
        assert!(config.runtime_api_available);
    }

    #[test]
    fn test_config_level_is_case_insensitive() {
        let config = FunctionConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "ERROR")])).unwrap();
        assert_eq!(config.log_level, LevelFilter::ERROR);
    }

    #[test]
    fn test_config_blank_values_are_unset() {
        let config =
            FunctionConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "  "), ("LOG_LEVEL", "")]))
                .unwrap();
        assert_eq!(config.environment, None);
        assert_eq!(config.log_level, LevelFilter::INFO);
    }

    #[test]
    fn test_config_rejects_unknown_level() {
        let result = FunctionConfig::from_lookup(lookup_from(&[("LOG_LEVEL", "chatty")]));
        match result {
            Err(EchoError::Config(msg)) => assert!(msg.contains("LOG_LEVEL")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
