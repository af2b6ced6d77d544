use thiserror::Error;

use reprise_codec::ParseError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(String),
    #[error("invalid config: {0}")]
    Parse(String),
    #[error("config serialize error: {0}")]
    Serialize(String),
}
