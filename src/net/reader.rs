//! Framed message reading.
//!
//! A GURT message is framed by the blank-line header terminator plus the
//! `content-length` header. The reader works over any byte stream, so the
//! same code drives the plaintext handshake response and the encrypted
//! application response.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{GurtError, Result};
use crate::protocol::{HEADER_TERMINATOR, MAX_MESSAGE_SIZE};

/// Reads one complete message (header block + declared body) and returns
/// the raw bytes; the codec re-derives the header/body split.
///
/// Fails with a connection error if the stream closes before the message
/// completes, and with a protocol error if the header block grows past
/// [`MAX_MESSAGE_SIZE`].
pub async fn read_message<S>(stream: &mut S) -> Result<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut buf = BytesMut::with_capacity(4096);

    // Accumulate until the header terminator appears.
    let header_end = loop {
        if let Some(pos) = find_terminator(&buf) {
            break pos + HEADER_TERMINATOR.len();
        }

        let n = stream
            .read_buf(&mut buf)
            .await
            .map_err(|e| GurtError::Connection(format!("read failed: {e}")))?;

        if n == 0 {
            return Err(GurtError::Connection(
                "connection closed while reading headers".to_string(),
            ));
        }

        if buf.len() > MAX_MESSAGE_SIZE {
            return Err(GurtError::Protocol("message too large".to_string()));
        }
    };

    let content_length = declared_content_length(&buf[..header_end]);

    while buf.len() - header_end < content_length {
        let n = stream
            .read_buf(&mut buf)
            .await
            .map_err(|e| GurtError::Connection(format!("read failed: {e}")))?;

        if n == 0 {
            return Err(GurtError::Connection(
                "connection closed while reading body".to_string(),
            ));
        }
    }

    Ok(buf.to_vec())
}

fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// Scans header lines for `content-length`. A missing header means an
/// empty body; a non-numeric value is tolerated as 0 rather than
/// rejected, matching the protocol's lenient reading of the field.
fn declared_content_length(header_bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(header_bytes);

    for line in text.split("\r\n") {
        if let Some((key, value)) = line.split_once(':') {
            if key.trim().eq_ignore_ascii_case("content-length") {
                return value.trim().parse().unwrap_or(0);
            }
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_is_case_insensitive() {
        let header = b"GURT/1.0.0 200 OK\r\nContent-Length: 12\r\n\r\n";
        assert_eq!(declared_content_length(header), 12);
    }

    #[test]
    fn non_numeric_content_length_reads_as_zero() {
        let header = b"GURT/1.0.0 200 OK\r\ncontent-length: twelve\r\n\r\n";
        assert_eq!(declared_content_length(header), 0);
    }
}
