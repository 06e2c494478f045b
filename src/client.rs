//! The GURT client and its request methods.

use serde::Serialize;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{GurtError, Result};
use crate::message::request::{Method, Request, RequestBuilder};
use crate::message::response::Response;
use crate::net::{connection, tls, url};

/// GURT protocol client.
///
/// Holds configuration and a reusable TLS connector, nothing else: every
/// request method resolves its URL, opens a fresh connection, runs the
/// handshake/upgrade sequence once, and closes the connection before
/// returning. There is no pooling, pipelining, or retry; callers needing
/// resilience loop externally.
///
/// # Example
///
/// ```ignore
/// use gurt_client::{Client, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> gurt_client::Result<()> {
///     let client = Client::new()?;
///     let response = client.get("gurt://localhost:4878/").await?;
///     println!("{} {}", response.status.as_u16(), response.status_message);
///     Ok(())
/// }
/// ```
pub struct Client {
    config: ClientConfig,
    tls: TlsConnector,
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with the given configuration. The TLS connector
    /// is built once here and reused across requests.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let tls = tls::connector(config.verify_tls)?;
        Ok(Self { config, tls })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a GET request.
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.send(Method::GET, url, None, None).await
    }

    /// Sends a POST request with the given body and content type.
    pub async fn post(
        &self,
        url: &str,
        body: impl Into<Vec<u8>>,
        content_type: &str,
    ) -> Result<Response> {
        self.send(Method::POST, url, Some(body.into()), Some(content_type))
            .await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json<T: Serialize>(&self, url: &str, data: &T) -> Result<Response> {
        let body = serde_json::to_vec(data)
            .map_err(|e| GurtError::Protocol(format!("invalid JSON body: {e}")))?;
        self.post(url, body, "application/json").await
    }

    /// Sends a PUT request with the given body and content type.
    pub async fn put(
        &self,
        url: &str,
        body: impl Into<Vec<u8>>,
        content_type: &str,
    ) -> Result<Response> {
        self.send(Method::PUT, url, Some(body.into()), Some(content_type))
            .await
    }

    /// Sends a DELETE request.
    pub async fn delete(&self, url: &str) -> Result<Response> {
        self.send(Method::DELETE, url, None, None).await
    }

    /// Sends a HEAD request.
    pub async fn head(&self, url: &str) -> Result<Response> {
        self.send(Method::HEAD, url, None, None).await
    }

    /// Sends an OPTIONS request.
    pub async fn options(&self, url: &str) -> Result<Response> {
        self.send(Method::OPTIONS, url, None, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
        content_type: Option<&str>,
    ) -> Result<Response> {
        let (host, port, path) = url::resolve(url)?;

        let mut builder = RequestBuilder::new()
            .method(method)
            .path(path)
            .header("host", host.clone())
            .header("user-agent", self.config.user_agent.clone());

        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let request = builder
            .build()
            .map_err(|e| GurtError::Protocol(e.to_string()))?;

        debug!(
            method = request.method.as_str(),
            host = %host,
            port = port,
            path = %request.path,
            "sending request"
        );

        self.send_built(&host, port, &request).await
    }

    /// Runs the full negotiation for an already-built request.
    pub async fn send_built(&self, host: &str, port: u16, request: &Request) -> Result<Response> {
        connection::send_request(&self.config, &self.tls, host, port, request).await
    }
}
