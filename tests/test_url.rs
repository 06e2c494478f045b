use gurt_client::net::url::resolve;
use gurt_client::GurtError;

#[test]
fn test_resolve_simple_url() {
    let (host, port, path) = resolve("gurt://example.com/test").unwrap();
    assert_eq!(host, "example.com");
    assert_eq!(port, 4878);
    assert_eq!(path, "/test");
}

#[test]
fn test_resolve_explicit_port() {
    let (host, port, path) = resolve("gurt://localhost:8080/api/data").unwrap();
    assert_eq!(host, "localhost");
    assert_eq!(port, 8080);
    assert_eq!(path, "/api/data");
}

#[test]
fn test_resolve_reattaches_query() {
    let (host, port, path) = resolve("gurt://api.example.com/search?q=test&limit=10").unwrap();
    assert_eq!(host, "api.example.com");
    assert_eq!(port, 4878);
    assert_eq!(path, "/search?q=test&limit=10");
}

#[test]
fn test_resolve_defaults_path() {
    let (host, port, path) = resolve("gurt://localhost").unwrap();
    assert_eq!(host, "localhost");
    assert_eq!(port, 4878);
    assert_eq!(path, "/");
}

#[test]
fn test_resolve_rejects_foreign_schemes() {
    assert!(matches!(
        resolve("http://example.com/"),
        Err(GurtError::Url(_))
    ));
    assert!(matches!(
        resolve("https://example.com/"),
        Err(GurtError::Url(_))
    ));
}

#[test]
fn test_resolve_rejects_missing_host() {
    assert!(matches!(resolve("gurt:///path"), Err(GurtError::Url(_))));
}

#[test]
fn test_resolve_rejects_garbage() {
    assert!(matches!(resolve("not a url"), Err(GurtError::Url(_))));
}
