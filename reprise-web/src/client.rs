use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::request::Request;
use crate::response::Response;
use crate::RequestError;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

/// Cooperative cancellation handle shared between a runner and whoever stops it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: CancellationToken,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    pub async fn cancelled(&self) {
        self.inner.cancelled().await;
    }
}

/// One connection per request, `Connection: close`, no retries.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn request(&self, request: Request) -> Result<Response, RequestError> {
        let timeout = self.config.timeout;
        match tokio::time::timeout(timeout, self.execute(request)).await {
            Ok(result) => result,
            Err(_) => Err(RequestError::Timeout(timeout)),
        }
    }

    async fn execute(&self, request: Request) -> Result<Response, RequestError> {
        debug!(
            method = %request.method,
            host = %request.host,
            port = request.port,
            https = request.https,
            "connecting"
        );
        let stream = TcpStream::connect((request.host.as_str(), request.port))
            .await
            .map_err(|err| RequestError::Connect(err.to_string()))?;
        let bytes = serialize_request(&request);
        let head_only = request.method == http::Method::HEAD;

        if !request.https {
            return exchange(stream, &bytes, head_only).await;
        }
        let connector = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(self.config.accept_invalid_certs)
            .build()
            .map_err(|err| RequestError::Tls(err.to_string()))?;
        let connector = tokio_native_tls::TlsConnector::from(connector);
        let stream = connector
            .connect(&request.host, stream)
            .await
            .map_err(|err| RequestError::Tls(err.to_string()))?;
        exchange(stream, &bytes, head_only).await
    }
}

pub(crate) fn serialize_request(request: &Request) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(256 + request.body.len());
    bytes.extend_from_slice(
        format!(
            "{} {} {}\r\n",
            request.method,
            request.target,
            request.wire_version()
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(format!("Host: {}\r\n", request.authority()).as_bytes());
    for (name, value) in &request.headers {
        bytes.extend_from_slice(name.as_bytes());
        bytes.extend_from_slice(b": ");
        bytes.extend_from_slice(value.as_bytes());
        bytes.extend_from_slice(b"\r\n");
    }
    if !request.body.is_empty() {
        bytes.extend_from_slice(format!("Content-Length: {}\r\n", request.body.len()).as_bytes());
    }
    bytes.extend_from_slice(b"Connection: close\r\n\r\n");
    bytes.extend_from_slice(&request.body);
    bytes
}

async fn exchange<S>(mut stream: S, bytes: &[u8], head_only: bool) -> Result<Response, RequestError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(bytes).await?;
    stream.flush().await?;
    read_response(BufReader::new(stream), head_only).await
}

pub(crate) async fn read_response<R>(
    mut reader: BufReader<R>,
    head_only: bool,
) -> Result<Response, RequestError>
where
    R: AsyncRead + Unpin,
{
    let status_line = read_line(&mut reader).await?;
    let status_line = status_line
        .ok_or_else(|| RequestError::InvalidResponse("empty response".to_string()))?;
    let (http_version, status, status_text) = parse_status_line(&status_line)?;

    let mut headers = Vec::new();
    while let Some(line) = read_line(&mut reader).await? {
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let mut response = Response {
        http_version,
        status,
        status_text,
        headers,
        body: Vec::new(),
    };
    if head_only || (100..200).contains(&status) || status == 204 || status == 304 {
        return Ok(response);
    }

    let chunked = response
        .header("transfer-encoding")
        .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));
    response.body = if chunked {
        read_chunked(&mut reader).await?
    } else if let Some(length) = response.header("content-length") {
        let length = length
            .parse::<u64>()
            .map_err(|_| RequestError::InvalidResponse(format!("bad content-length {length}")))?;
        let mut body = Vec::new();
        (&mut reader).take(length).read_to_end(&mut body).await?;
        if (body.len() as u64) < length {
            return Err(RequestError::InvalidResponse(format!(
                "body truncated at {} of {} bytes",
                body.len(),
                length
            )));
        }
        body
    } else {
        let mut body = Vec::new();
        reader.read_to_end(&mut body).await?;
        body
    };
    Ok(response)
}

/// Reads one line without its terminator. `None` at end of stream.
async fn read_line<R>(reader: &mut BufReader<R>) -> Result<Option<String>, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::new();
    let read = reader.read_until(b'\n', &mut line).await?;
    if read == 0 {
        return Ok(None);
    }
    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

fn parse_status_line(line: &str) -> Result<(String, u16, String), RequestError> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(RequestError::InvalidResponse(format!("bad status line {line:?}")));
    }
    let status = parts
        .next()
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| RequestError::InvalidResponse(format!("bad status line {line:?}")))?;
    let status_text = match parts.next().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string(),
    };
    Ok((version.to_string(), status, status_text))
}

async fn read_chunked<R>(reader: &mut BufReader<R>) -> Result<Vec<u8>, RequestError>
where
    R: AsyncRead + Unpin,
{
    let mut body = Vec::new();
    loop {
        let line = read_line(reader)
            .await?
            .ok_or_else(|| RequestError::InvalidResponse("unterminated chunked body".to_string()))?;
        let size = line.split(';').next().unwrap_or_default().trim();
        let size = usize::from_str_radix(size, 16)
            .map_err(|_| RequestError::InvalidResponse(format!("bad chunk size {size:?}")))?;
        if size == 0 {
            // trailers
            while let Some(line) = read_line(reader).await? {
                if line.is_empty() {
                    break;
                }
            }
            return Ok(body);
        }
        let expected = body.len().checked_add(size).ok_or_else(|| {
            RequestError::InvalidResponse(format!("chunk size {size:#x} overflows body"))
        })?;
        (&mut *reader).take(size as u64).read_to_end(&mut body).await?;
        if body.len() != expected {
            return Err(RequestError::InvalidResponse(format!(
                "chunk truncated at {} of {} bytes",
                body.len(),
                expected
            )));
        }
        read_line(reader).await?;
    }
}
