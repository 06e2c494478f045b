//! Client for the GURT protocol.
//!
//! GURT is an HTTP-like, text-framed protocol with one twist: every
//! connection starts with a plaintext HANDSHAKE exchange, then upgrades
//! the same socket to TLS 1.3 with a mandatory ALPN check before the
//! application request is sent.

pub mod client;
pub mod config;
pub mod error;
pub mod message;
pub mod net;
pub mod protocol;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{GurtError, Result};
pub use message::request::{Method, Request, RequestBuilder};
pub use message::response::{Response, ResponseBuilder, StatusCode};
