use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub raw_text: String,
    pub use_https: bool,
}

impl HistoryEntry {
    pub fn new(raw_text: impl Into<String>, use_https: bool) -> Self {
        Self {
            raw_text: raw_text.into(),
            use_https,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryAvailability {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}
