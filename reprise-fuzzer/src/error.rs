use thiserror::Error;

/// Attack setup failures. All of them are raised before any request is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("unknown attack type: {0}")]
    UnknownAttackType(String),
    #[error("attack would generate {requested} requests, limit is {limit}")]
    LimitExceeded { requested: usize, limit: usize },
    #[error("template has no payload positions")]
    NoPositions,
    #[error("invalid numeric range {from}..={to} step {step}")]
    InvalidRange { from: i64, to: i64, step: i64 },
    #[error("unterminated payload marker at byte {0}")]
    UnterminatedMarker(usize),
    #[error("analysis error: {0}")]
    Analysis(String),
}
