use super::LocalConfig;
use super::protocol::{self, LocalProtocolError};
use crate::{EchoError, Result};
use crate::handler::{EchoHandler, JsonEncoder, PayloadEncoder};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::{signal, time::timeout};
use tracing::{Instrument, debug, error, info, warn};

/// Serves the echo handler over plain HTTP/1.1 for local development
///
/// Every request goes through the same [`EchoHandler`] the Lambda runtime
/// uses, so responses match what API Gateway would return.
///
/// # Examples
///
/// ```no_run
/// use echo_lambda::handler::EchoHandler;
/// use echo_lambda::local::{LocalConfig, LocalServer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = LocalConfig {
///         bind_addr: "127.0.0.1:3000".parse()?,
///         ..Default::default()
///     };
///
///     let server = LocalServer::new(config, EchoHandler::new());
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct LocalServer<E = JsonEncoder> {
    config: LocalConfig,
    handler: Arc<EchoHandler<E>>,
    shutdown_signal: Arc<tokio::sync::broadcast::Sender<()>>,
}

impl<E> LocalServer<E>
where
    E: PayloadEncoder + Send + Sync + 'static,
{
    pub fn new(config: LocalConfig, handler: EchoHandler<E>) -> Self {
        let (shutdown_signal, _) = tokio::sync::broadcast::channel(1);
        Self {
            config,
            handler: Arc::new(handler),
            shutdown_signal: Arc::new(shutdown_signal),
        }
    }

    /// Binds to the configured address and serves until shut down
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.run_with_listener(listener).await
    }

    /// Serves connections from an already bound listener
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        info!(address = %local_addr, "Local echo server listening");

        let connection_count = Arc::new(AtomicUsize::new(0));
        let mut shutdown_rx = self.shutdown_signal.subscribe();

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, addr)) => {
                            let Some(new_count) = try_acquire(&connection_count, self.config.max_connections) else {
                                warn!(%addr, limit = self.config.max_connections, "Connection rejected: limit reached");
                                continue;
                            };
                            debug!(%addr, current = new_count, "Accepted connection");

                            let config = self.config.clone();
                            let handler = Arc::clone(&self.handler);
                            let connection_count = connection_count.clone();
                            let span = tracing::info_span!("connection", %addr);

                            tokio::spawn(async move {
                                if let Err(e) = Self::handle_connection(stream, &config, &handler).instrument(span).await {
                                    error!(%addr, error = %e, "Error handling connection");
                                }
                                let final_count = connection_count.fetch_sub(1, Ordering::SeqCst) - 1;
                                debug!(%addr, current = final_count, "Connection closed");
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to accept connection");
                        }
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping server");
                    break;
                }
                _ = shutdown_rx.recv() => {
                    info!("Received internal shutdown signal, stopping server");
                    break;
                }
            }
        }

        info!("Local echo server stopped");
        Ok(())
    }

    /// Returns a sender that stops the accept loop when signalled
    pub fn shutdown_signal(&self) -> tokio::sync::broadcast::Sender<()> {
        self.shutdown_signal.as_ref().clone()
    }

    /// Reads one request, answers it, and closes the connection
    async fn handle_connection(
        mut stream: TcpStream,
        config: &LocalConfig,
        handler: &EchoHandler<E>,
    ) -> Result<()> {
        let read_result = timeout(
            config.read_timeout,
            protocol::read_request(&mut stream, config.buffer_size, config.max_request_size),
        )
        .await;

        let response = match read_result {
            Ok(Ok(request)) => handler.handle(&request),
            Ok(Err(e)) => match e.status() {
                Some(status) => {
                    warn!(error = %e, status = status.as_u16(), "Rejected request");
                    protocol::error_response(status, &e)
                }
                None => return closed_early(e),
            },
            Err(_) => {
                warn!("Read timeout");
                return Ok(());
            }
        };

        let bytes = protocol::encode_response(&response);
        match timeout(config.write_timeout, stream.write_all(&bytes)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(EchoError::Timeout(format!(
                    "Write did not finish within {:?}",
                    config.write_timeout
                )));
            }
        }
        stream.flush().await?;
        stream.shutdown().await?;

        info!(status = response.status_code, size = bytes.len(), "Sent response");
        Ok(())
    }
}

/// Takes a connection slot if fewer than `limit` are in use, returning the
/// new count
fn try_acquire(count: &AtomicUsize, limit: usize) -> Option<usize> {
    count
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            (current < limit).then_some(current + 1)
        })
        .ok()
        .map(|previous| previous + 1)
}

// A client hanging up before sending a full request is not an error.
fn closed_early(err: LocalProtocolError) -> Result<()> {
    match err {
        LocalProtocolError::IncompleteRequest => {
            debug!("Client closed connection before completing a request");
            Ok(())
        }
        other => Err(other.into()),
    }
}
