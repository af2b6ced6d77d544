use serde::{Deserialize, Serialize};

use reprise_codec::{Header, StructuredResponse, format_response};
use reprise_fuzzer::AnalysisResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendOutcome {
    pub status: u16,
    pub status_text: String,
    pub http_version: String,
    pub headers: Vec<Header>,
    pub body: String,
    /// Length of the decoded body.
    pub size_bytes: usize,
    pub duration_ms: u64,
}

impl SendOutcome {
    pub fn to_response(&self) -> StructuredResponse {
        StructuredResponse {
            http_version: self.http_version.clone(),
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }

    pub fn formatted(&self) -> String {
        format_response(&self.to_response())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackOutcome {
    pub index: usize,
    pub payloads: Vec<String>,
    pub status: Option<u16>,
    pub duration_ms: Option<u64>,
    pub size_bytes: Option<usize>,
    pub error: Option<String>,
    pub analysis: Option<AnalysisResult>,
}

impl AttackOutcome {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackRunReport {
    pub outcomes: Vec<AttackOutcome>,
    pub cancelled: bool,
}

impl AttackRunReport {
    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_error()).count()
    }
}
