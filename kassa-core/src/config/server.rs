//! Server configuration.

use std::net::SocketAddr;

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port the HTTP server listens on.
    pub listen: SocketAddr,
}
