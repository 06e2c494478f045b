//! GURT message types and codec.
//!
//! Messages are HTTP-like text frames:
//!
//! ```text
//! Request:  "<METHOD> <path> GURT/<version>\r\n" {"<key>: <value>\r\n"} "\r\n" <body>
//! Response: "GURT/<version> <code> <message>\r\n" {"<key>: <value>\r\n"} "\r\n" <body>
//! ```
//!
//! Header names are case-insensitive (stored lower-cased), bodies are raw
//! bytes framed by the `content-length` header.
//!
//! - **`headers`**: case-normalizing header map
//! - **`request`**: request methods, [`Request`](request::Request) and its builder
//! - **`response`**: status code registry, [`Response`](response::Response) and its builder
//! - **`parser`**: decodes raw bytes into messages, enforcing the grammar
//! - **`writer`**: encodes messages into wire bytes, defaulting required headers

pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
