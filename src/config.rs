use std::time::Duration;

use crate::protocol::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_HANDSHAKE_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, USER_AGENT,
};

/// Client configuration.
///
/// Pure data, held by a [`Client`](crate::client::Client) for its
/// lifetime. Each field bounds one phase of a request, except
/// `user_agent` and `verify_tls` which shape the handshake and upgrade.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for the plaintext handshake exchange and TLS upgrade.
    pub handshake_timeout: Duration,
    /// Deadline for the application request/response on the encrypted channel.
    pub request_timeout: Duration,
    /// Deadline for establishing the TCP connection.
    pub connection_timeout: Duration,
    /// Value of the `user-agent` header on every outgoing request.
    pub user_agent: String,
    /// When false, server certificate and hostname checks are disabled.
    /// This is insecure and only acceptable against development servers
    /// with self-signed certificates.
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            handshake_timeout: DEFAULT_HANDSHAKE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
            verify_tls: false,
        }
    }
}
