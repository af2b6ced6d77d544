use thiserror::Error;

use crate::CaptureId;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("unknown capture {0}")]
    UnknownCapture(CaptureId),
    #[error("invalid capture file: {0}")]
    Decode(String),
}
