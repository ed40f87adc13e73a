//! Integration tests: header fetch and JSON POST against a local server.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use opskit_core::catalog;
use opskit_core::error::FetchError;
use opskit_core::http::{fetch_headers, post_json};

const T: Duration = Duration::from_secs(5);

fn server() -> String {
    let mut bodies = HashMap::new();
    bodies.insert("hello".to_string(), b"hello\n".to_vec());
    common::http_server::start(bodies)
}

#[test]
fn fetch_headers_returns_final_response_headers() {
    let base = server();
    let r = fetch_headers(&format!("{}/redirect", base), T).unwrap();
    assert_eq!(r.status, 200);
    assert!(r
        .headers
        .iter()
        .any(|(k, v)| k == "X-Test" && v == "opskit"));
    assert!(!r.headers.iter().any(|(k, _)| k == "Location"));
}

#[test]
fn fetch_headers_rejects_404() {
    let base = server();
    let err = fetch_headers(&format!("{}/missing", base), T).unwrap_err();
    assert!(matches!(err, FetchError::Rejected(404)));
}

#[test]
fn fetch_headers_transport_error() {
    let err = fetch_headers(&common::http_server::refused_url(), T).unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[test]
fn post_json_echo_decodes() {
    let base = server();
    let payload = catalog::default_post_payload();
    let r = post_json(
        &format!("{}/echo", base),
        &catalog::default_post_headers(),
        &payload,
        T,
    )
    .unwrap();
    assert_eq!(r.status, 200);
    let v = r.json().unwrap();
    assert_eq!(v["json"], payload);
}

#[test]
fn post_json_non_json_response_is_decode_error() {
    let base = server();
    let r = post_json(
        &format!("{}/html", base),
        &[],
        &catalog::default_post_payload(),
        T,
    )
    .unwrap();
    assert_eq!(r.body, b"<html>hi</html>");
    assert!(r.json().is_err());
}
