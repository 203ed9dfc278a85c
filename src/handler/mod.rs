//! Request echo handler
//!
//! Reflects the method, path, headers, query parameters and body of a proxy
//! event back to the caller as a JSON document. The handler is a pure
//! function of its input: it keeps no state between invocations and always
//! produces exactly one response.
//!
//! # Examples
//!
//! ```
//! use echo_lambda::event::ProxyRequest;
//! use echo_lambda::handler::EchoHandler;
//!
//! let handler = EchoHandler::new();
//! let response = handler.handle(&ProxyRequest::new("GET", "/").with_query_param("name", "World"));
//!
//! assert_eq!(response.status_code, 200);
//! assert!(response.body.contains(r#""queryParams":{"name":"World"}"#));
//! ```

pub mod encoder;
pub mod payload;


pub use encoder::{EncodeError, JsonEncoder, PayloadEncoder};
pub use payload::{EchoPayload, GREETING};

use crate::event::{ProxyRequest, ProxyResponse, StringMap};
use tracing::{error, info};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const CORS_ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Body sent when the payload could not be encoded
pub const INTERNAL_ERROR_BODY: &str = r#"{"error": "Internal server error"}"#;

/// Echoes proxy requests back as JSON
///
/// Generic over the [`PayloadEncoder`] so the failure branch can be driven
/// with an encoder that refuses the payload.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler<E = JsonEncoder> {
    encoder: E,
}

impl EchoHandler {
    /// Creates a handler that encodes with `serde_json`
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: PayloadEncoder> EchoHandler<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Handles a single request
    ///
    /// Returns `200` with the echoed payload and CORS headers, or `500` with
    /// a fixed error body and only a content type when encoding fails.
    pub fn handle(&self, request: &ProxyRequest) -> ProxyResponse {
        info!(
            method = %request.http_method,
            path = %request.path,
            request = ?request,
            "Received request"
        );

        let payload = EchoPayload::from(request);
        match self.encoder.encode(&payload) {
            Ok(body) => ProxyResponse {
                status_code: 200,
                headers: success_headers(),
                body,
            },
            Err(e) => {
                error!(error = %e, "Error encoding response");
                ProxyResponse {
                    status_code: 500,
                    headers: error_headers(),
                    body: INTERNAL_ERROR_BODY.to_string(),
                }
            }
        }
    }
}

fn success_headers() -> StringMap {
    [
        ("Content-Type", CONTENT_TYPE_JSON),
        ("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN),
        ("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS),
        ("Access-Control-Allow-Methods", CORS_ALLOW_METHODS),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect()
}

// No CORS headers on failure.
fn error_headers() -> StringMap {
    StringMap::from([("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())])
}
