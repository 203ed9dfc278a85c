//! An AWS Lambda echo function for API Gateway proxy integrations
//!
//! The [`handler`] reflects an inbound request back as JSON. It runs under
//! the Lambda Runtime API through [`runtime`], or behind the plain HTTP
//! server in [`local`] during development.

use crate::local::LocalProtocolError;
use thiserror::Error;

/// Error types for the echo-lambda library
#[derive(Error, Debug)]
pub enum EchoError {
    /// Socket errors (bind, accept, read, write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or unsupported HTTP on the local server
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Failures reported by the Lambda runtime
    #[error("Lambda runtime error: {0}")]
    Runtime(String),
}

impl From<LocalProtocolError> for EchoError {
    fn from(err: LocalProtocolError) -> Self {
        match err {
            LocalProtocolError::Io(e) => EchoError::Io(e),
            LocalProtocolError::IncompleteRequest => {
                EchoError::Protocol("Incomplete HTTP request".to_string())
            }
            other => EchoError::Protocol(other.to_string()),
        }
    }
}

/// Result type for the echo-lambda library
pub type Result<T> = std::result::Result<T, EchoError>;

pub mod config;
pub mod event;
pub mod handler;
pub mod local;
pub mod logging;
pub mod runtime;

// Re-export main types for convenience
pub use config::FunctionConfig;
pub use event::{ProxyRequest, ProxyResponse};
pub use handler::{EchoHandler, JsonEncoder, PayloadEncoder};
pub use local::{LocalConfig, LocalServer};
