use bytes::Bytes;
use http::Method;

use crate::RequestError;

/// A request as it goes on the wire. `target` is written verbatim, so it may
/// carry bytes a strict URI parser would refuse.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub https: bool,
    pub host: String,
    pub port: u16,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub http_version: String,
}

impl Request {
    pub fn builder(host: impl Into<String>, port: u16) -> RequestBuilder {
        RequestBuilder::new(host, port)
    }

    /// Value for the `Host` header; the port is omitted when it is the scheme default.
    pub fn authority(&self) -> String {
        let default_port = if self.https { 443 } else { 80 };
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        if self.port == default_port {
            host
        } else {
            format!("{}:{}", host, self.port)
        }
    }

    /// HTTP/1.0 is kept; anything else is sent as HTTP/1.1.
    pub fn wire_version(&self) -> &str {
        if self.http_version.eq_ignore_ascii_case("HTTP/1.0") {
            "HTTP/1.0"
        } else {
            "HTTP/1.1"
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    https: bool,
    host: String,
    port: u16,
    target: String,
    headers: Vec<(String, String)>,
    body: Bytes,
    http_version: String,
}

impl RequestBuilder {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            method: Method::GET,
            https: false,
            host: host.into(),
            port,
            target: "/".to_string(),
            headers: Vec::new(),
            body: Bytes::new(),
            http_version: "HTTP/1.1".to_string(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn method_str(self, method: &str) -> Result<Self, RequestError> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|err| RequestError::InvalidRequest(err.to_string()))?;
        Ok(self.method(method))
    }

    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn http_version(mut self, http_version: impl Into<String>) -> Self {
        self.http_version = http_version.into();
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            https: self.https,
            host: self.host,
            port: self.port,
            target: self.target,
            headers: self.headers,
            body: self.body,
            http_version: self.http_version,
        }
    }
}
