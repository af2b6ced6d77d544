mod baseline;
mod config;
mod error;
mod executor;
mod model;
mod transport;

pub use baseline::{BaselineTracker, ResponseDiff, diff_responses};
pub use config::{AttackSection, CaptureSection, ClientSection, ReplayConfig};
pub use error::{ConfigError, ReplayError};
pub use executor::ReplayExecutor;
pub use model::{AttackOutcome, AttackRunReport, SendOutcome};
pub use transport::{Transport, TransportResponse};
