//! End-to-end tests against a mock GURT server: plaintext handshake on a
//! local socket, TLS accept with a self-signed certificate, one
//! application exchange.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

use gurt_client::message::parser::parse_request;
use gurt_client::message::writer::encode_response;
use gurt_client::net::reader::read_message;
use gurt_client::{Client, ClientConfig, GurtError, Method, ResponseBuilder, StatusCode};

fn test_config() -> ClientConfig {
    ClientConfig {
        connection_timeout: Duration::from_secs(2),
        handshake_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(2),
        verify_tls: false,
        ..ClientConfig::default()
    }
}

/// TLS acceptor with a fresh self-signed certificate for localhost.
fn tls_acceptor(alpn: Option<&[u8]>) -> TlsAcceptor {
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    let key = PrivatePkcs8KeyDer::from(cert.key_pair.serialize_der());
    let cert_der = CertificateDer::from(cert.cert);

    let mut config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(vec![cert_der], key.into())
        .unwrap();
    if let Some(alpn) = alpn {
        config.alpn_protocols = vec![alpn.to_vec()];
    }

    TlsAcceptor::from(Arc::new(config))
}

/// Reads the client's HANDSHAKE request and answers 101.
async fn accept_handshake(stream: &mut TcpStream) {
    let raw = read_message(stream).await.unwrap();
    let request = parse_request(&raw).unwrap();
    assert_eq!(request.method, Method::HANDSHAKE);
    assert_eq!(request.path, "/");
    assert!(request.header("host").is_some());
    assert!(request.header("user-agent").is_some());

    let response = ResponseBuilder::new(StatusCode::SwitchingProtocols)
        .header("upgrade", "GURT/1.0")
        .build();
    stream
        .write_all(&encode_response(&response))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_round_trip_over_tls() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let acceptor = tls_acceptor(Some(b"GURT/1.0"));

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        accept_handshake(&mut stream).await;

        let mut tls_stream = acceptor.accept(stream).await.unwrap();
        let raw = read_message(&mut tls_stream).await.unwrap();
        let request = parse_request(&raw).unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/hello?name=world");
        assert_eq!(request.header("host"), Some("localhost"));

        let response = ResponseBuilder::new(StatusCode::Ok)
            .header("content-type", "text/plain")
            .body(b"hi there".to_vec())
            .build();
        tls_stream
            .write_all(&encode_response(&response))
            .await
            .unwrap();
        let _ = tls_stream.shutdown().await;
    });

    let client = Client::with_config(test_config()).unwrap();
    let response = client
        .get(&format!("gurt://localhost:{port}/hello?name=world"))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.is_success());
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.text().unwrap(), "hi there");

    server.await.unwrap();
}

#[tokio::test]
async fn test_post_json_round_trip() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let acceptor = tls_acceptor(Some(b"GURT/1.0"));

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        accept_handshake(&mut stream).await;

        let mut tls_stream = acceptor.accept(stream).await.unwrap();
        let raw = read_message(&mut tls_stream).await.unwrap();
        let request = parse_request(&raw).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.header("content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["name"], "gurt");

        let response = ResponseBuilder::new(StatusCode::Created)
            .json_body(&serde_json::json!({"id": 7}))
            .unwrap()
            .build();
        tls_stream
            .write_all(&encode_response(&response))
            .await
            .unwrap();
        let _ = tls_stream.shutdown().await;
    });

    let client = Client::with_config(test_config()).unwrap();
    let response = client
        .post_json(
            &format!("gurt://localhost:{port}/items"),
            &serde_json::json!({"name": "gurt"}),
        )
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::Created);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["id"], 7);

    server.await.unwrap();
}

#[tokio::test]
async fn test_handshake_rejection_is_handshake_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // The server refuses the upgrade; the client must fail with a
    // handshake error and never start TLS.
    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let raw = read_message(&mut stream).await.unwrap();
        parse_request(&raw).unwrap();

        let response = ResponseBuilder::new(StatusCode::ServiceUnavailable).build();
        stream
            .write_all(&encode_response(&response))
            .await
            .unwrap();
    });

    let client = Client::with_config(test_config()).unwrap();
    let err = client
        .get(&format!("gurt://127.0.0.1:{port}/"))
        .await
        .unwrap_err();

    assert!(matches!(err, GurtError::Handshake(_)));
    assert!(err.to_string().contains("503"));

    server.await.unwrap();
}

#[tokio::test]
async fn test_alpn_mismatch_is_tls_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    // No ALPN configured server-side, so the upgrade negotiates nothing.
    let acceptor = tls_acceptor(None);

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        accept_handshake(&mut stream).await;

        if let Ok(mut tls_stream) = acceptor.accept(stream).await {
            // The client tears the connection down after its ALPN check.
            let _ = read_message(&mut tls_stream).await;
        }
    });

    let client = Client::with_config(test_config()).unwrap();
    let err = client
        .get(&format!("gurt://localhost:{port}/"))
        .await
        .unwrap_err();

    assert!(matches!(err, GurtError::Tls(_)));

    server.await.unwrap();
}

#[tokio::test]
async fn test_connection_refused_is_connection_error() {
    // Bind then drop to find a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = Client::with_config(test_config()).unwrap();
    let err = client
        .get(&format!("gurt://127.0.0.1:{port}/"))
        .await
        .unwrap_err();

    assert!(matches!(err, GurtError::Connection(_)));
}

#[tokio::test]
async fn test_silent_server_is_handshake_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    // Accept the connection but never answer the handshake.
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(stream);
    });

    let config = ClientConfig {
        handshake_timeout: Duration::from_millis(200),
        ..test_config()
    };
    let client = Client::with_config(config).unwrap();
    let err = client
        .get(&format!("gurt://127.0.0.1:{port}/"))
        .await
        .unwrap_err();

    assert!(matches!(err, GurtError::Timeout(_)));

    server.abort();
    let _ = server.await;
}

#[tokio::test]
async fn test_wrong_scheme_is_url_error() {
    let client = Client::with_config(test_config()).unwrap();
    let err = client.get("https://example.com/").await.unwrap_err();

    assert!(matches!(err, GurtError::Url(_)));
}
