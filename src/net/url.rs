//! Resolution of gurt:// URLs into connection targets.

use crate::error::{GurtError, Result};
use crate::protocol::{DEFAULT_PORT, GURT_SCHEME};

/// Resolves a GURT URL into `(host, port, path)`.
///
/// The port defaults to 4878 and the path to "/". A query string is
/// re-attached to the path so downstream code sees one request target.
pub fn resolve(raw: &str) -> Result<(String, u16, String)> {
    let parsed =
        url::Url::parse(raw).map_err(|e| GurtError::Url(format!("{raw}: {e}")))?;

    if parsed.scheme() != GURT_SCHEME {
        return Err(GurtError::Url(format!(
            "URL must use {GURT_SCHEME}:// scheme: {raw}"
        )));
    }

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => {
            return Err(GurtError::Url(format!("URL must have a hostname: {raw}")));
        }
    };

    let port = parsed.port().unwrap_or(DEFAULT_PORT);

    let mut path = parsed.path().to_string();
    if path.is_empty() {
        path = "/".to_string();
    }
    if let Some(query) = parsed.query() {
        path = format!("{path}?{query}");
    }

    Ok((host, port, path))
}
