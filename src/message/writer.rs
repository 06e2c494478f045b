//! Encoding of [`Request`] and [`Response`] into wire bytes.
//!
//! Both encoders emit the start line, one `key: value` line per header
//! (with protocol-required headers defaulted when the caller left them
//! out), a blank line, then the raw body unmodified.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::message::headers::Headers;
use crate::message::request::Request;
use crate::message::response::Response;
use crate::protocol::{PROTOCOL_PREFIX, SERVER_ID, USER_AGENT};

/// Encodes a request. Defaults `content-length` (body byte count) and
/// `user-agent` when absent.
pub fn encode_request(request: &Request) -> Vec<u8> {
    let mut buf = Vec::new();

    let request_line = format!(
        "{} {} {}{}\r\n",
        request.method.as_str(),
        request.path,
        PROTOCOL_PREFIX,
        request.version
    );
    buf.extend_from_slice(request_line.as_bytes());

    let mut headers = request.headers.clone();
    if !headers.contains_key("content-length") {
        headers.insert("content-length", request.body.len().to_string());
    }
    if !headers.contains_key("user-agent") {
        headers.insert("user-agent", USER_AGENT);
    }

    write_headers(&mut buf, &headers);
    buf.extend_from_slice(&request.body);
    buf
}

/// Encodes a response. Defaults `content-length`, `server`, and `date`
/// when absent.
pub fn encode_response(response: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    let status_line = format!(
        "{}{} {} {}\r\n",
        PROTOCOL_PREFIX,
        response.version,
        response.status.as_u16(),
        response.status_message
    );
    buf.extend_from_slice(status_line.as_bytes());

    let mut headers = response.headers.clone();
    if !headers.contains_key("content-length") {
        headers.insert("content-length", response.body.len().to_string());
    }
    if !headers.contains_key("server") {
        headers.insert("server", SERVER_ID);
    }
    if !headers.contains_key("date") {
        headers.insert("date", http_date(SystemTime::now()));
    }

    write_headers(&mut buf, &headers);
    buf.extend_from_slice(&response.body);
    buf
}

fn write_headers(buf: &mut Vec<u8>, headers: &Headers) {
    for (key, value) in headers.iter() {
        buf.extend_from_slice(key.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    buf.extend_from_slice(b"\r\n");
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// RFC-1123 timestamp, e.g. "Tue, 05 Aug 2025 17:03:41 GMT".
fn http_date(now: SystemTime) -> String {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let (hour, minute, second) = (rem / 3600, rem % 3600 / 60, rem % 60);

    // 1970-01-01 was a Thursday.
    let weekday = WEEKDAYS[((days + 4) % 7) as usize];
    let (year, month, day) = civil_from_days(days);

    format!(
        "{}, {:02} {} {} {:02}:{:02}:{:02} GMT",
        weekday,
        day,
        MONTHS[(month - 1) as usize],
        year,
        hour,
        minute,
        second
    )
}

/// Gregorian civil date from days since the Unix epoch.
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe as i64 + era * 400 + i64::from(month <= 2);

    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn http_date_formats_known_instant() {
        // 2025-08-05 17:03:41 UTC
        let instant = UNIX_EPOCH + Duration::from_secs(1_754_413_421);
        assert_eq!(http_date(instant), "Tue, 05 Aug 2025 17:03:41 GMT");
    }

    #[test]
    fn civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(19_723), (2024, 1, 1));
    }
}
