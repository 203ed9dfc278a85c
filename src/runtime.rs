//! Lambda Runtime API binding
//!
//! Polls the Runtime API for proxy events and answers each one with the
//! echo handler's response. The invocation future never fails; anything the
//! runtime itself reports is surfaced as [`EchoError::Runtime`].

use crate::event::{ProxyRequest, ProxyResponse};
use crate::handler::{EchoHandler, PayloadEncoder};
use crate::{EchoError, Result};
use lambda_runtime::{LambdaEvent, service_fn};
use std::sync::Arc;
use tracing::{Instrument, info};

/// Handles one invocation inside a span tagged with the Lambda request id
pub async fn invoke<E: PayloadEncoder>(
    handler: &EchoHandler<E>,
    event: LambdaEvent<ProxyRequest>,
) -> ProxyResponse {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    async { handler.handle(&event.payload) }.instrument(span).await
}

/// Runs the handler under the Lambda runtime until the runtime shuts down
pub async fn run<E>(handler: EchoHandler<E>) -> Result<()>
where
    E: PayloadEncoder + Send + Sync + 'static,
{
    let handler = Arc::new(handler);
    info!("Starting Lambda runtime");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyRequest>| {
        let handler = Arc::clone(&handler);
        async move { Ok::<_, lambda_runtime::Error>(invoke(&handler, event).await) }
    }))
    .await
    .map_err(|e| EchoError::Runtime(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;

    #[tokio::test]
    async fn test_invoke_echoes_payload() {
        let handler = EchoHandler::new();
        let request = ProxyRequest::new("GET", "/").with_query_param("name", "World");
        let event = LambdaEvent::new(request, Context::default());

        let response = invoke(&handler, event).await;

        assert_eq!(response.status_code, 200);
        assert!(response.body.contains(r#""queryParams":{"name":"World"}"#));
    }
}
