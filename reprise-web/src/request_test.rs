use assert_matches::assert_matches;

use crate::client::serialize_request;
use crate::{Request, RequestError};

#[test]
fn https_request_omits_default_port() {
    let request = Request::builder("example.com", 443)
        .https(true)
        .target("/a?b=1")
        .method(http::Method::POST)
        .body(b"hello".to_vec())
        .build();

    assert_eq!(request.target, "/a?b=1");
    assert_eq!(request.authority(), "example.com");
    assert_eq!(&request.body[..], b"hello");
}

#[test]
fn authority_keeps_non_default_port_and_brackets_ipv6() {
    let request = Request::builder("::1", 8080).build();
    assert_eq!(request.authority(), "[::1]:8080");
}

#[test]
fn rejects_invalid_method() {
    let result = Request::builder("example.com", 80).method_str("BAD METHOD");
    assert_matches!(result, Err(RequestError::InvalidRequest(_)));
}

#[test]
fn unknown_versions_go_out_as_http11() {
    let request = Request::builder("example.com", 80)
        .method_str("PATCH")
        .unwrap()
        .http_version("HTTP/2")
        .header("X-A", "1")
        .build();
    let bytes = String::from_utf8(serialize_request(&request)).unwrap();
    assert_eq!(
        bytes,
        "PATCH / HTTP/1.1\r\nHost: example.com\r\nX-A: 1\r\nConnection: close\r\n\r\n"
    );
}
