use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the local development server
///
/// # Examples
///
/// ```rust
/// use echo_lambda::local::LocalConfig;
/// use std::time::Duration;
///
/// let config = LocalConfig {
///     bind_addr: "127.0.0.1:3000".parse().unwrap(),
///     max_connections: 50,
///     read_timeout: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert_eq!(config.buffer_size, 8192);
/// ```
#[derive(Debug, Clone)]
pub struct LocalConfig {
    /// Network address to bind to
    pub bind_addr: SocketAddr,
    /// Maximum number of concurrent connections
    pub max_connections: usize,
    /// Size of each socket read
    pub buffer_size: usize,
    /// Largest accepted request, head and body together
    pub max_request_size: usize,
    /// Read timeout for connections
    pub read_timeout: Duration,
    /// Write timeout for connections
    pub write_timeout: Duration,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: 100,
            buffer_size: 8192,
            max_request_size: 1024 * 1024, // 1MB
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
        }
    }
}
