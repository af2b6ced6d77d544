mod analysis;
mod attack;
mod error;
mod model;
mod payload;
mod template;

pub use analysis::{Analyzer, analyze_response};
pub use attack::{count_requests, generate_attack, generate_attack_by_name};
pub use error::GenerationError;
pub use model::{
    AnalysisConfig, AnalysisResult, AttackPosition, AttackRequest, AttackType,
    DEFAULT_MAX_REQUESTS, MarkerSpan, PayloadProcessing, PayloadSource, TransformStep,
};
pub use payload::{apply_processing, generate_payloads_for_position, payload_count};
pub use template::{MARKER, positions_from_template, replace_positions, scan_positions, strip_markers};
