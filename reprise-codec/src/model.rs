use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Protocol-level pseudo-headers such as `:authority` never reach the wire.
    pub fn is_pseudo(&self) -> bool {
        self.name.starts_with(':')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredRequest {
    pub method: String,
    pub path: String,
    pub http_version: String,
    pub headers: Vec<Header>,
    pub host: String,
    pub body: Option<String>,
}

impl StructuredRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn body_bytes(&self) -> &[u8] {
        self.body.as_deref().map(str::as_bytes).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredResponse {
    pub http_version: String,
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<Header>,
    pub body: String,
}

impl StructuredResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn from_https(use_https: bool) -> Self {
        if use_https { Self::Https } else { Self::Http }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// Everything the sender needs besides the request itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendOptions {
    pub scheme: Scheme,
    pub url: String,
}

impl SendOptions {
    pub fn for_request(request: &StructuredRequest, scheme: Scheme) -> Self {
        Self {
            scheme,
            url: format!("{}://{}{}", scheme.as_str(), request.host, request.path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub request: StructuredRequest,
    pub options: SendOptions,
}

/// A request after the outbound header policy has been applied; ready to hand
/// to a transport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub target: String,
    pub http_version: String,
    pub headers: Vec<Header>,
    pub body: Vec<u8>,
}

pub(crate) fn find_header<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|header| header.is_named(name))
        .map(|header| header.value.as_str())
}
