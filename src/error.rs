use thiserror::Error;

/// Errors produced by the GURT client.
///
/// Every failure crossing the client boundary is one of these kinds; lower
/// level `std::io` or TLS errors are wrapped at the phase where they occur
/// and never leak through as-is.
#[derive(Debug, Error)]
pub enum GurtError {
    /// Malformed address or wrong URL scheme.
    #[error("invalid URL: {0}")]
    Url(String),

    /// Socket refused, unreachable, or closed mid-read.
    #[error("connection error: {0}")]
    Connection(String),

    /// A phase deadline (connection, handshake, or request) expired.
    #[error("{0} timeout")]
    Timeout(String),

    /// TLS setup failure or ALPN negotiation mismatch.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Handshake rejected by the server, or an unclassified failure while
    /// the handshake exchange was in flight.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// Malformed wire grammar: bad request/status line, unknown method or
    /// status code, missing protocol prefix, oversized message.
    #[error("protocol error: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, GurtError>;
