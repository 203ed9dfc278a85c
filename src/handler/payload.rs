use crate::event::{ProxyRequest, StringMap};
use serde::Serialize;

/// Greeting placed in every echoed payload
pub const GREETING: &str = "Hello from Go Lambda!";

/// The JSON document echoed back to the caller
///
/// Borrows everything from the request it was built from. `body` and
/// `query_params` are left out of the encoded document entirely when the
/// request carried none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoPayload<'a> {
    pub message: &'a str,
    pub method: &'a str,
    pub path: &'a str,
    pub headers: &'a StringMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_params: Option<&'a StringMap>,
}

impl<'a> From<&'a ProxyRequest> for EchoPayload<'a> {
    fn from(request: &'a ProxyRequest) -> Self {
        Self {
            message: GREETING,
            method: &request.http_method,
            path: &request.path,
            headers: &request.headers,
            body: request.body_text(),
            query_params: request.query_params(),
        }
    }
}
