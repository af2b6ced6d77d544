use serde::{Deserialize, Serialize};

use crate::{Header, OutboundRequest, SendOptions, StructuredRequest};

/// Connection-management and transport-computed headers. The transport writes
/// its own `Host`, `Content-Length` and `Connection`.
pub const DENIED_HEADERS: &[&str] = &[
    "content-length",
    "host",
    "connection",
    "keep-alive",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
    "expect",
    "proxy-connection",
];

pub const DENIED_PREFIXES: &[&str] = &["sec-", "proxy-"];

pub const CONDITIONAL_HEADERS: &[&str] = &[
    "if-none-match",
    "if-modified-since",
    "if-match",
    "if-unmodified-since",
    "if-range",
];

pub const DEFAULT_REPLAY_HEADER: &str = "X-Reprise-Replay";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutboundPolicy {
    pub replay_header_name: String,
    pub replay_header_value: String,
}

impl Default for OutboundPolicy {
    fn default() -> Self {
        Self {
            replay_header_name: DEFAULT_REPLAY_HEADER.to_string(),
            replay_header_value: "1".to_string(),
        }
    }
}

pub fn is_denied_header(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    DENIED_HEADERS.contains(&lower.as_str())
        || DENIED_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
}

pub fn is_conditional_header(name: &str) -> bool {
    CONDITIONAL_HEADERS
        .iter()
        .any(|conditional| conditional.eq_ignore_ascii_case(name))
}

/// RFC 7230 `token` characters.
pub fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|byte| {
            byte.is_ascii_alphanumeric()
                || matches!(
                    byte,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

pub fn retain_sendable_headers(headers: Vec<Header>) -> Vec<Header> {
    headers
        .into_iter()
        .filter(|header| {
            !header.is_pseudo() && is_valid_header_name(&header.name) && !is_denied_header(&header.name)
        })
        .collect()
}

/// Applies the replay header policy: conditional headers go, cache directives
/// are forced and the replay marker is attached so capture can skip our own
/// traffic.
pub fn prepare_outbound(
    request: &StructuredRequest,
    options: &SendOptions,
    policy: &OutboundPolicy,
) -> OutboundRequest {
    let mut headers: Vec<Header> = request
        .headers
        .iter()
        .filter(|header| {
            !is_conditional_header(&header.name)
                && !header.is_named("cache-control")
                && !header.is_named("pragma")
                && !header.is_named(&policy.replay_header_name)
        })
        .cloned()
        .collect();
    headers = retain_sendable_headers(headers);
    headers.push(Header::new("Cache-Control", "no-cache"));
    headers.push(Header::new("Pragma", "no-cache"));
    headers.push(Header::new(
        policy.replay_header_name.clone(),
        policy.replay_header_value.clone(),
    ));

    let (host, port) = split_host_port(&request.host, options.scheme.default_port());
    OutboundRequest {
        method: request.method.clone(),
        scheme: options.scheme,
        host,
        port,
        target: request.path.clone(),
        http_version: request.http_version.clone(),
        headers,
        body: request.body_bytes().to_vec(),
    }
}

pub fn split_host_port(authority: &str, default_port: u16) -> (String, u16) {
    let authority = authority.trim();
    if let Some(rest) = authority.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|port| port.parse::<u16>().ok())
                .unwrap_or(default_port);
            return (host.to_string(), port);
        }
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse::<u16>() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (authority.to_string(), default_port),
        },
        _ => (authority.to_string(), default_port),
    }
}
