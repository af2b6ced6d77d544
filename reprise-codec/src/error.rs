use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty request")]
    Empty,
    #[error("malformed start line: {0}")]
    MalformedStartLine(String),
    #[error("missing host")]
    MissingHost,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid base64: {0}")]
    Base64(String),
    #[error("invalid url encoding: {0}")]
    Url(String),
    #[error("compression error: {0}")]
    Compression(String),
}
