//! Transport plumbing: URL resolution, framed reading, TLS setup, and
//! the connect/handshake/upgrade/exchange sequence.
//!
//! - **`url`**: resolves gurt:// addresses into `(host, port, path)`
//! - **`reader`**: reads one framed message from any byte stream
//! - **`tls`**: builds the TLS 1.3 connector with the GURT ALPN pinned
//! - **`connection`**: the ordered negotiation a request runs through

pub mod connection;
pub mod reader;
pub mod tls;
pub mod url;
