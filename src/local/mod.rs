//! Local development server
//!
//! Accepts plain HTTP/1.1 requests, converts each one into the proxy event
//! API Gateway would have produced for the catch-all `ANY /` and
//! `ANY /{proxy+}` routes, runs the echo handler, and writes the proxy
//! response back. One request is served per connection.

pub mod config;
pub mod protocol;
pub mod server;


pub use config::LocalConfig;
pub use protocol::LocalProtocolError;
pub use server::LocalServer;
