//! Decoding of raw message bytes into [`Request`] and [`Response`].
//!
//! Framing (how many bytes make up one message) is the reader's job; the
//! parsers here take a complete buffer and enforce the wire grammar.

use crate::error::{GurtError, Result};
use crate::message::headers::Headers;
use crate::message::request::{Method, Request};
use crate::message::response::{Response, StatusCode};
use crate::protocol::{HEADER_TERMINATOR, PROTOCOL_PREFIX};

/// Parses a GURT request from raw bytes.
pub fn parse_request(buf: &[u8]) -> Result<Request> {
    let (header_bytes, body) = split_message(buf);
    let lines = header_lines(header_bytes, "empty request")?;

    // Request line: exactly <METHOD> <path> GURT/<version>
    let parts: Vec<&str> = lines[0].split_whitespace().collect();
    if parts.len() != 3 {
        return Err(GurtError::Protocol(format!(
            "invalid request line: {:?}",
            lines[0]
        )));
    }

    let method = Method::from_str(parts[0])
        .ok_or_else(|| GurtError::Protocol(format!("unsupported method: {}", parts[0])))?;

    let version = strip_version(parts[2])?;

    Ok(Request {
        method,
        path: parts[1].to_string(),
        version,
        headers: parse_headers(&lines[1..]),
        body: body.to_vec(),
    })
}

/// Parses a GURT response from raw bytes.
///
/// The status message is optional on the wire; when present it overrides
/// the registry default for that code.
pub fn parse_response(buf: &[u8]) -> Result<Response> {
    let (header_bytes, body) = split_message(buf);
    let lines = header_lines(header_bytes, "empty response")?;

    // Status line: GURT/<version> <code> [<message with spaces>]
    let parts: Vec<&str> = lines[0].splitn(3, ' ').collect();
    if parts.len() < 2 {
        return Err(GurtError::Protocol(format!(
            "invalid status line: {:?}",
            lines[0]
        )));
    }

    let version = strip_version(parts[0])?;

    let status = parts[1]
        .parse::<u16>()
        .ok()
        .and_then(StatusCode::from_u16)
        .ok_or_else(|| GurtError::Protocol(format!("unknown status code: {}", parts[1])))?;

    let status_message = match parts.get(2) {
        Some(wire_message) => wire_message.to_string(),
        None => status.message().to_string(),
    };

    Ok(Response {
        version,
        status,
        status_message,
        headers: parse_headers(&lines[1..]),
        body: body.to_vec(),
    })
}

/// Splits a buffer at the first header terminator. Without one, the whole
/// buffer is header text and the body is empty.
fn split_message(buf: &[u8]) -> (&[u8], &[u8]) {
    match buf
        .windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
    {
        Some(pos) => (&buf[..pos], &buf[pos + HEADER_TERMINATOR.len()..]),
        None => (buf, &[][..]),
    }
}

fn header_lines<'a>(header_bytes: &'a [u8], empty_msg: &str) -> Result<Vec<&'a str>> {
    let text = std::str::from_utf8(header_bytes)
        .map_err(|_| GurtError::Protocol("header block is not valid UTF-8".to_string()))?;

    if text.is_empty() {
        return Err(GurtError::Protocol(empty_msg.to_string()));
    }

    Ok(text.split("\r\n").collect())
}

fn strip_version(token: &str) -> Result<String> {
    token
        .strip_prefix(PROTOCOL_PREFIX)
        .map(str::to_string)
        .ok_or_else(|| GurtError::Protocol(format!("invalid protocol identifier: {token}")))
}

/// Header lines are `key: value`, split on the first colon, trimmed, and
/// stored under the lower-cased key. A blank line ends header parsing
/// early; lines without a colon are skipped.
fn parse_headers(lines: &[&str]) -> Headers {
    let mut headers = Headers::new();

    for line in lines {
        if line.trim().is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim(), value.trim().to_string());
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let raw = b"GET /test GURT/1.0.0\r\nHost: example.com\r\n\r\n";
        let parsed = parse_request(raw).unwrap();

        assert_eq!(parsed.method, Method::GET);
        assert_eq!(parsed.path, "/test");
        assert_eq!(parsed.version, "1.0.0");
        assert_eq!(parsed.headers.get("host"), Some("example.com"));
    }

    #[test]
    fn parse_status_line_without_message() {
        let raw = b"GURT/1.0.0 204\r\n\r\n";
        let parsed = parse_response(raw).unwrap();

        assert_eq!(parsed.status, StatusCode::NoContent);
        assert_eq!(parsed.status_message, "NO_CONTENT");
    }
}
