use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::message::headers::Headers;
use crate::protocol::GURT_VERSION;

/// GURT status codes.
///
/// A closed registry: decoding an integer outside it is a protocol error,
/// never a silent default. Each code maps to one fixed uppercase message;
/// classification is purely numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 101 SWITCHING_PROTOCOLS, the only acceptable handshake reply
    SwitchingProtocols,
    /// 200 OK
    Ok,
    /// 201 CREATED
    Created,
    /// 202 ACCEPTED
    Accepted,
    /// 204 NO_CONTENT
    NoContent,
    /// 400 BAD_REQUEST
    BadRequest,
    /// 401 UNAUTHORIZED
    Unauthorized,
    /// 403 FORBIDDEN
    Forbidden,
    /// 404 NOT_FOUND
    NotFound,
    /// 405 METHOD_NOT_ALLOWED
    MethodNotAllowed,
    /// 408 TIMEOUT
    Timeout,
    /// 413 TOO_LARGE
    TooLarge,
    /// 415 UNSUPPORTED_MEDIA_TYPE
    UnsupportedMediaType,
    /// 429 TOO_MANY_REQUESTS
    TooManyRequests,
    /// 500 INTERNAL_SERVER_ERROR
    InternalServerError,
    /// 501 NOT_IMPLEMENTED
    NotImplemented,
    /// 502 BAD_GATEWAY
    BadGateway,
    /// 503 SERVICE_UNAVAILABLE
    ServiceUnavailable,
    /// 504 GATEWAY_TIMEOUT
    GatewayTimeout,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::SwitchingProtocols => 101,
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::Accepted => 202,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::Timeout => 408,
            StatusCode::TooLarge => 413,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::TooManyRequests => 429,
            StatusCode::InternalServerError => 500,
            StatusCode::NotImplemented => 501,
            StatusCode::BadGateway => 502,
            StatusCode::ServiceUnavailable => 503,
            StatusCode::GatewayTimeout => 504,
        }
    }

    /// Maps a wire integer back into the registry.
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            101 => Some(StatusCode::SwitchingProtocols),
            200 => Some(StatusCode::Ok),
            201 => Some(StatusCode::Created),
            202 => Some(StatusCode::Accepted),
            204 => Some(StatusCode::NoContent),
            400 => Some(StatusCode::BadRequest),
            401 => Some(StatusCode::Unauthorized),
            403 => Some(StatusCode::Forbidden),
            404 => Some(StatusCode::NotFound),
            405 => Some(StatusCode::MethodNotAllowed),
            408 => Some(StatusCode::Timeout),
            413 => Some(StatusCode::TooLarge),
            415 => Some(StatusCode::UnsupportedMediaType),
            429 => Some(StatusCode::TooManyRequests),
            500 => Some(StatusCode::InternalServerError),
            501 => Some(StatusCode::NotImplemented),
            502 => Some(StatusCode::BadGateway),
            503 => Some(StatusCode::ServiceUnavailable),
            504 => Some(StatusCode::GatewayTimeout),
            _ => None,
        }
    }

    /// The canonical message for this code.
    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::SwitchingProtocols => "SWITCHING_PROTOCOLS",
            StatusCode::Ok => "OK",
            StatusCode::Created => "CREATED",
            StatusCode::Accepted => "ACCEPTED",
            StatusCode::NoContent => "NO_CONTENT",
            StatusCode::BadRequest => "BAD_REQUEST",
            StatusCode::Unauthorized => "UNAUTHORIZED",
            StatusCode::Forbidden => "FORBIDDEN",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            StatusCode::Timeout => "TIMEOUT",
            StatusCode::TooLarge => "TOO_LARGE",
            StatusCode::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            StatusCode::TooManyRequests => "TOO_MANY_REQUESTS",
            StatusCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            StatusCode::NotImplemented => "NOT_IMPLEMENTED",
            StatusCode::BadGateway => "BAD_GATEWAY",
            StatusCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            StatusCode::GatewayTimeout => "GATEWAY_TIMEOUT",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            StatusCode::Ok | StatusCode::Created | StatusCode::Accepted | StatusCode::NoContent
        )
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    pub fn is_server_error(&self) -> bool {
        self.as_u16() >= 500
    }
}

/// A GURT response.
///
/// `status_message` defaults to the registry message for the status code;
/// when decoded from the wire, the message the server actually sent takes
/// precedence over the canonical table.
#[derive(Debug, Clone)]
pub struct Response {
    pub version: String,
    pub status: StatusCode,
    pub status_message: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

/// Builder for constructing responses in a fluent style.
///
/// The version and status message take their protocol defaults; decoded
/// responses carry whatever the wire actually said instead.
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Serializes `value` as the body and sets `content-type` to
    /// application/json.
    pub fn json_body<T: Serialize>(mut self, value: &T) -> serde_json::Result<Self> {
        self.body = serde_json::to_vec(value)?;
        self.headers.insert("content-type", "application/json");
        Ok(self)
    }

    pub fn build(self) -> Response {
        Response {
            version: GURT_VERSION.to_string(),
            status: self.status,
            status_message: self.status.message().to_string(),
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        ResponseBuilder::new(StatusCode::Ok).build()
    }

    /// Creates a 404 NOT_FOUND response.
    pub fn not_found() -> Self {
        ResponseBuilder::new(StatusCode::NotFound).build()
    }

    /// Creates a 400 BAD_REQUEST response.
    pub fn bad_request() -> Self {
        ResponseBuilder::new(StatusCode::BadRequest).build()
    }

    /// Creates a 500 INTERNAL_SERVER_ERROR response.
    pub fn internal_server_error() -> Self {
        ResponseBuilder::new(StatusCode::InternalServerError).build()
    }

    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.body)
    }

    /// Parses the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}
