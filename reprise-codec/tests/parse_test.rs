use assert_matches::assert_matches;
use reprise_codec::*;

fn sample_request() -> StructuredRequest {
    StructuredRequest {
        method: "POST".to_string(),
        path: "/api/login?next=%2Fhome".to_string(),
        http_version: "HTTP/1.1".to_string(),
        headers: vec![
            Header::new("Content-Type", "application/json"),
            Header::new("X-Trace", "abc:def"),
            Header::new("Cookie", "session=1"),
        ],
        host: "example.com".to_string(),
        body: Some("{\"user\":\"admin\"}\n\nsecond paragraph".to_string()),
    }
}

#[test]
fn format_then_parse_is_identity() {
    let requests = vec![
        sample_request(),
        StructuredRequest {
            body: None,
            headers: Vec::new(),
            method: "GET".to_string(),
            path: "/".to_string(),
            ..sample_request()
        },
        StructuredRequest {
            http_version: "HTTP/1.0".to_string(),
            host: "127.0.0.1:8443".to_string(),
            body: Some("\nleading blank line".to_string()),
            ..sample_request()
        },
    ];

    for request in requests {
        let raw = format_request(&request);
        let parsed = parse_request(&raw, false).unwrap();
        assert_eq!(parsed.request, request);
    }
}

#[test]
fn splits_headers_and_body_on_first_blank_line() {
    let raw = "post /submit HTTP/1.1\nHost: example.com\nX-A: 1\n\nline one\n\nline three";
    let parsed = parse_request(raw, true).unwrap();
    assert_eq!(parsed.request.method, "POST");
    assert_eq!(parsed.request.path, "/submit");
    assert_eq!(parsed.request.headers, vec![Header::new("X-A", "1")]);
    assert_eq!(
        parsed.request.body.as_deref(),
        Some("line one\n\nline three")
    );
    assert_eq!(parsed.options.scheme, Scheme::Https);
    assert_eq!(parsed.options.url, "https://example.com/submit");
}

#[test]
fn tolerates_crlf_input() {
    let raw = "GET /a HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\nbody\r\nmore";
    let parsed = parse_request(raw, false).unwrap();
    assert_eq!(parsed.request.headers, vec![Header::new("Accept", "*/*")]);
    assert_eq!(parsed.request.body.as_deref(), Some("body\nmore"));
}

#[test]
fn header_value_keeps_everything_after_first_colon() {
    let raw = "GET / HTTP/1.1\nHost: example.com\nReferer: https://example.com:8080/x\n\n";
    let parsed = parse_request(raw, false).unwrap();
    assert_eq!(
        parsed.request.header("referer"),
        Some("https://example.com:8080/x")
    );
}

#[test]
fn version_is_optional() {
    let parsed = parse_request("GET /health\nHost: example.com", false).unwrap();
    assert_eq!(parsed.request.http_version, DEFAULT_HTTP_VERSION);
    assert_eq!(parsed.request.body, None);
}

#[test]
fn pseudo_headers_are_dropped() {
    let raw = "GET / HTTP/2\n:authority: example.com\n:method: GET\nHost: example.com\nAccept: text/html\n\n";
    let parsed = parse_request(raw, false).unwrap();
    assert_eq!(parsed.request.headers, vec![Header::new("Accept", "text/html")]);
}

#[test]
fn denied_headers_never_survive_parsing() {
    let raw = "POST / HTTP/1.1\nHost: example.com\nContent-Length: 4\nCONNECTION: keep-alive\n\
Transfer-Encoding: chunked\nSec-Fetch-Mode: cors\nProxy-Authorization: x\nKeep-Alive: 5\n\
Accept: */*\n\nbody";
    let parsed = parse_request(raw, false).unwrap();
    for header in &parsed.request.headers {
        assert!(!is_denied_header(&header.name), "{} leaked", header.name);
    }
    assert_eq!(parsed.request.headers, vec![Header::new("Accept", "*/*")]);
}

#[test]
fn malformed_header_names_are_dropped_silently() {
    let raw = "GET / HTTP/1.1\nHost: example.com\nBad Header: x\nno colon here\nX(y): z\nGood: yes\n\n";
    let parsed = parse_request(raw, false).unwrap();
    assert_eq!(parsed.request.headers, vec![Header::new("Good", "yes")]);
}

#[test]
fn missing_host_is_an_error() {
    let err = parse_request("GET / HTTP/1.1\nAccept: */*\n\n", false).unwrap_err();
    assert_matches!(err, ParseError::MissingHost);
    assert_eq!(err.to_string(), "missing host");
}

#[test]
fn host_recovered_from_absolute_target() {
    let parsed = parse_request("GET http://example.com:8080/a?b=c HTTP/1.1\n\n", false).unwrap();
    assert_eq!(parsed.request.host, "example.com:8080");
    assert_eq!(parsed.request.path, "/a?b=c");
}

#[test]
fn host_recovered_from_fallback_url() {
    let parsed = parse_request_with_fallback(
        "GET /a HTTP/1.1\n\n",
        true,
        Some("https://api.example.com/original"),
    )
    .unwrap();
    assert_eq!(parsed.request.host, "api.example.com");
    assert_eq!(parsed.options.url, "https://api.example.com/a");
}

#[test]
fn empty_and_malformed_start_lines_fail() {
    assert_matches!(parse_request("", false), Err(ParseError::Empty));
    assert_matches!(parse_request("\n\nbody", false), Err(ParseError::Empty));
    assert_matches!(
        parse_request("GET\nHost: example.com", false),
        Err(ParseError::MalformedStartLine(_))
    );
}
