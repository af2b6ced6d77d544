use url::Url;

use crate::headers::retain_sendable_headers;
use crate::{Header, ParseError, ParsedRequest, Scheme, SendOptions, StructuredRequest};

pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

pub fn normalize_newlines(raw: &str) -> String {
    raw.replace("\r\n", "\n")
}

pub fn parse_request(raw: &str, use_https: bool) -> Result<ParsedRequest, ParseError> {
    parse_request_with_fallback(raw, use_https, None)
}

/// Parses editor text into a request. `fallback_url` is the URL the request was
/// originally captured from; it supplies the host when the text has none.
pub fn parse_request_with_fallback(
    raw: &str,
    use_https: bool,
    fallback_url: Option<&str>,
) -> Result<ParsedRequest, ParseError> {
    let text = normalize_newlines(raw);
    let mut lines = text.split('\n');

    let start_line = lines.next().map(str::trim).unwrap_or_default();
    if start_line.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parts = start_line.split_whitespace();
    let method = parts
        .next()
        .map(str::to_ascii_uppercase)
        .ok_or_else(|| ParseError::MalformedStartLine(start_line.to_string()))?;
    let target = parts
        .next()
        .ok_or_else(|| ParseError::MalformedStartLine(start_line.to_string()))?;
    let http_version = parts.next().unwrap_or(DEFAULT_HTTP_VERSION).to_string();

    let mut headers = Vec::new();
    let mut host_header: Option<String> = None;
    let mut body = None;
    while let Some(line) = lines.next() {
        if line.trim().is_empty() {
            let rest = lines.by_ref().collect::<Vec<_>>().join("\n");
            if !rest.is_empty() {
                body = Some(rest);
            }
            break;
        }
        if line.starts_with(':') {
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let header = Header::new(name.trim(), value.trim());
        if header.is_named("host") && host_header.is_none() && !header.value.is_empty() {
            host_header = Some(header.value.clone());
        }
        headers.push(header);
    }

    let (path, target_authority) = split_target(target);
    let host = host_header
        .or(target_authority)
        .or_else(|| fallback_url.and_then(authority_of))
        .ok_or(ParseError::MissingHost)?;

    let request = StructuredRequest {
        method,
        path,
        http_version,
        headers: retain_sendable_headers(headers),
        host,
        body,
    };
    let options = SendOptions::for_request(&request, Scheme::from_https(use_https));
    Ok(ParsedRequest { request, options })
}

/// Absolute-form targets (`GET http://host/path`) are reduced to origin-form;
/// the authority is handed back for host recovery.
fn split_target(target: &str) -> (String, Option<String>) {
    let lower = target.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return (target.to_string(), None);
    }
    match Url::parse(target) {
        Ok(url) => {
            let path = &url[url::Position::BeforePath..url::Position::AfterQuery];
            let path = if path.is_empty() { "/" } else { path };
            (path.to_string(), authority_from_url(&url))
        }
        Err(_) => (target.to_string(), None),
    }
}

fn authority_of(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(authority_from_url)
}

fn authority_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
