//! GURT protocol constants.
//!
//! Everything fixed by the protocol lives here: the version token the
//! client emits, the wire framing separators, the ALPN identifier both
//! sides must agree on during the TLS upgrade, and the default limits.

use std::time::Duration;

/// Protocol version emitted in every request line.
pub const GURT_VERSION: &str = "1.0.0";

/// Prefix of the version token on request and status lines ("GURT/1.0.0").
pub const PROTOCOL_PREFIX: &str = "GURT/";

/// URL scheme accepted by the resolver.
pub const GURT_SCHEME: &str = "gurt";

/// Well-known GURT port, used when the URL carries none.
pub const DEFAULT_PORT: u16 = 4878;

/// Terminator between the header block and the body.
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// ALPN identifier offered during the TLS upgrade. The negotiated
/// protocol must equal this exactly or the connection attempt fails.
pub const GURT_ALPN: &[u8] = b"GURT/1.0";

/// Upper bound on a single message (headers + body).
pub const MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifier sent in the `user-agent` header when the caller sets none.
pub const USER_AGENT: &str = "GURT-Rust-Client/1.0.0";

/// Identifier for the `server` header defaulted on encoded responses.
pub const SERVER_ID: &str = "GURT/1.0.0";
