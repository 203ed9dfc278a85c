//! API Gateway proxy event types
//!
//! These mirror the JSON documents exchanged with API Gateway's REST proxy
//! integration. Only the fields the echo function reads are modelled; the
//! rest of the event (`requestContext`, `multiValueHeaders`, ...) is ignored
//! on the way in.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;


/// Header, query and path parameter maps.
///
/// Ordered so that encoding the same event twice yields identical bytes.
pub type StringMap = BTreeMap<String, String>;

/// An inbound HTTP request as described by an API Gateway proxy event
///
/// Mapping fields that the gateway sends as `null` decode as empty maps.
///
/// # Examples
///
/// ```
/// use echo_lambda::event::ProxyRequest;
///
/// let request = ProxyRequest::new("POST", "/api/test")
///     .with_header("Content-Type", "application/json")
///     .with_body(r#"{"test":"data"}"#);
///
/// assert_eq!(request.http_method, "POST");
/// assert_eq!(request.body_text(), Some(r#"{"test":"data"}"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// Resource template the gateway matched, e.g. `/{proxy+}`
    #[serde(default)]
    pub resource: Option<String>,
    /// URL path as received
    #[serde(default, deserialize_with = "nullable")]
    pub path: String,
    /// HTTP verb
    #[serde(default, deserialize_with = "nullable")]
    pub http_method: String,
    /// Single-value request headers
    #[serde(default, deserialize_with = "nullable")]
    pub headers: StringMap,
    /// Single-value query string parameters
    #[serde(default, deserialize_with = "nullable")]
    pub query_string_parameters: StringMap,
    /// Values captured by the resource template
    #[serde(default, deserialize_with = "nullable")]
    pub path_parameters: StringMap,
    /// Stage variables of the deployed API stage
    #[serde(default, deserialize_with = "nullable")]
    pub stage_variables: StringMap,
    /// Request body; `None` when no body was sent
    #[serde(default)]
    pub body: Option<String>,
    /// Whether `body` carries base64-encoded binary content
    #[serde(default, deserialize_with = "nullable")]
    pub is_base64_encoded: bool,
}

impl ProxyRequest {
    /// Creates a request with the given method and path and nothing else
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the body if one was sent and it is not empty
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }

    /// Returns the query parameters if there is at least one
    pub fn query_params(&self) -> Option<&StringMap> {
        Some(&self.query_string_parameters).filter(|params| !params.is_empty())
    }
}

/// The response document handed back to API Gateway
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Response headers
    pub headers: StringMap,
    /// UTF-8 response body
    pub body: String,
}

impl ProxyResponse {
    /// Looks up a response header by exact name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
