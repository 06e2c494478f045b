//! Connection negotiation and the single request/response exchange.
//!
//! Every request walks the same strictly ordered sequence over one TCP
//! connection, terminal on the first failure:
//!
//! ```text
//!        ┌───────────┐
//!        │  Connect  │ ← TCP connect, bounded by connection_timeout
//!        └─────┬─────┘
//!              │ connected
//!              ▼
//!        ┌───────────┐
//!        │ Handshake │ ← plaintext HANDSHAKE request, response must be 101
//!        └─────┬─────┘
//!              │ 101 SWITCHING_PROTOCOLS
//!              ▼
//!        ┌───────────┐
//!        │  Upgrade  │ ← TLS 1.3 over the same socket, ALPN must be GURT/1.0
//!        └─────┬─────┘
//!              │ verified
//!              ▼
//!        ┌───────────┐
//!        │ Exchange  │ ← encrypted request/response, bounded by request_timeout
//!        └───────────┘
//! ```
//!
//! The connection is owned by this module for the duration of the call
//! and dropped (closed) on every exit path, success or failure.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{GurtError, Result};
use crate::message::parser;
use crate::message::request::{Method, Request, RequestBuilder};
use crate::message::response::{Response, StatusCode};
use crate::message::writer;
use crate::net::reader::read_message;
use crate::protocol::GURT_ALPN;

/// Opens a connection to `host:port`, negotiates the handshake and TLS
/// upgrade, sends `request`, and returns the decoded response.
pub async fn send_request(
    config: &ClientConfig,
    tls: &TlsConnector,
    host: &str,
    port: u16,
    request: &Request,
) -> Result<Response> {
    let mut stream = connect(host, port, config).await?;

    handshake(&mut stream, host, config).await?;

    let mut tls_stream = upgrade(stream, host, tls, config).await?;

    let response = exchange(&mut tls_stream, request, config).await;
    let _ = tls_stream.shutdown().await;
    response
}

async fn connect(host: &str, port: u16, config: &ClientConfig) -> Result<TcpStream> {
    let addr = format!("{host}:{port}");

    let stream = match timeout(config.connection_timeout, TcpStream::connect(&addr)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            return Err(GurtError::Connection(format!(
                "failed to connect to {addr}: {e}"
            )));
        }
        Err(_) => return Err(GurtError::Timeout("connection".to_string())),
    };

    debug!(addr = %addr, "connected");
    Ok(stream)
}

/// Sends the plaintext HANDSHAKE request and awaits the 101 reply. Any
/// other status aborts the sequence before the upgrade is attempted.
async fn handshake(stream: &mut TcpStream, host: &str, config: &ClientConfig) -> Result<()> {
    let request = RequestBuilder::new()
        .method(Method::HANDSHAKE)
        .path("/")
        .header("host", host)
        .header("user-agent", config.user_agent.clone())
        .build()
        .map_err(|e| GurtError::Handshake(e.to_string()))?;

    stream
        .write_all(&writer::encode_request(&request))
        .await
        .map_err(|e| GurtError::Handshake(format!("failed to send handshake: {e}")))?;

    let raw = match timeout(config.handshake_timeout, read_message(stream)).await {
        Ok(result) => result?,
        Err(_) => return Err(GurtError::Timeout("handshake".to_string())),
    };

    let response = parser::parse_response(&raw)?;

    if response.status != StatusCode::SwitchingProtocols {
        return Err(GurtError::Handshake(format!(
            "server refused upgrade: {} {}",
            response.status.as_u16(),
            response.status_message
        )));
    }

    debug!(host = %host, "handshake accepted, upgrading to TLS");
    Ok(())
}

/// Wraps the socket in TLS and verifies the negotiated ALPN identifier.
/// Agreement on the identifier is a hard post-condition: a connection
/// that negotiated anything else is unusable and torn down.
async fn upgrade(
    stream: TcpStream,
    host: &str,
    tls: &TlsConnector,
    config: &ClientConfig,
) -> Result<TlsStream<TcpStream>> {
    let server_name = ServerName::try_from(host.to_string())
        .map_err(|_| GurtError::Tls(format!("invalid server name: {host}")))?;

    let tls_stream = match timeout(config.handshake_timeout, tls.connect(server_name, stream)).await
    {
        Ok(Ok(tls_stream)) => tls_stream,
        Ok(Err(e)) => return Err(GurtError::Tls(format!("TLS handshake failed: {e}"))),
        Err(_) => return Err(GurtError::Timeout("handshake".to_string())),
    };

    let negotiated = tls_stream.get_ref().1.alpn_protocol();
    if negotiated != Some(GURT_ALPN) {
        let expected = String::from_utf8_lossy(GURT_ALPN);
        let got = negotiated
            .map(|p| String::from_utf8_lossy(p).into_owned())
            .unwrap_or_else(|| "none".to_string());
        return Err(GurtError::Tls(format!(
            "ALPN negotiation failed: expected {expected}, got {got}"
        )));
    }

    debug!(host = %host, "TLS upgrade complete");
    Ok(tls_stream)
}

/// Writes the application request on the encrypted channel and reads the
/// response, bounded by the request timeout.
async fn exchange<S>(stream: &mut S, request: &Request, config: &ClientConfig) -> Result<Response>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream
        .write_all(&writer::encode_request(request))
        .await
        .map_err(|e| GurtError::Connection(format!("failed to send request: {e}")))?;

    let raw = match timeout(config.request_timeout, read_message(stream)).await {
        Ok(result) => result?,
        Err(_) => return Err(GurtError::Timeout("request".to_string())),
    };

    let response = parser::parse_response(&raw)?;

    debug!(
        status = response.status.as_u16(),
        message = %response.status_message,
        "received response"
    );

    Ok(response)
}
