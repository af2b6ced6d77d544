use thiserror::Error;

use reprise_capture::CaptureId;
use reprise_fuzzer::GenerationError;
use reprise_replay::ReplayError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no request selected")]
    NoSelection,
    #[error("unknown capture {0}")]
    UnknownCapture(CaptureId),
    #[error("a send is already in flight")]
    SendInFlight,
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
