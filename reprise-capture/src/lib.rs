mod dedup;
mod error;
mod list;
mod model;

pub use dedup::{is_duplicate, signature};
pub use error::CaptureError;
pub use list::{CaptureList, IngestOutcome, captures_from_json, captures_to_json};
pub use model::{CaptureId, CapturedRequest};
