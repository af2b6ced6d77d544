use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use reprise_codec::{StructuredRequest, StructuredResponse, format_request_for_editing};

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(transparent)]
pub struct CaptureId(pub u64);

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapturedRequest {
    #[serde(default)]
    pub id: CaptureId,
    pub url: String,
    pub request: StructuredRequest,
    #[serde(default)]
    pub response: Option<StructuredResponse>,
    /// Latest resend result. Resending never creates a new capture.
    #[serde(default)]
    pub current_response: Option<StructuredResponse>,
    pub captured_at: String,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub from_other_tab: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl CapturedRequest {
    pub fn new(
        url: impl Into<String>,
        request: StructuredRequest,
        response: Option<StructuredResponse>,
    ) -> Self {
        Self {
            id: CaptureId::default(),
            url: url.into(),
            request,
            response,
            current_response: None,
            captured_at: Utc::now().to_rfc3339(),
            page_url: None,
            from_other_tab: false,
            name: None,
            starred: false,
            color: None,
        }
    }

    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }

    pub fn use_https(&self) -> bool {
        self.url.to_ascii_lowercase().starts_with("https://")
    }

    /// Raw text shown when the request is first opened in the editor.
    pub fn editable_text(&self) -> String {
        format_request_for_editing(&self.request)
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{} {}", self.request.method, self.request.path),
        }
    }
}
