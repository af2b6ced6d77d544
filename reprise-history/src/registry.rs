use std::collections::HashMap;

use reprise_capture::CaptureId;

use crate::{HistoryEntry, HistorySnapshot, HistoryStack};

/// Saved editing sessions, one per capture.
#[derive(Debug, Clone, Default)]
pub struct HistoryRegistry {
    sessions: HashMap<CaptureId, HistorySnapshot>,
}

impl HistoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, id: CaptureId, stack: &HistoryStack) {
        self.sessions.insert(id, stack.snapshot());
    }

    /// Restores the saved session for `id`, or starts a fresh one at `original`.
    pub fn open(&mut self, id: CaptureId, original: HistoryEntry) -> HistoryStack {
        match self.sessions.remove(&id) {
            Some(snapshot) => HistoryStack::restore(snapshot, original),
            None => HistoryStack::new(original),
        }
    }

    pub fn contains(&self, id: CaptureId) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn forget(&mut self, id: CaptureId) {
        self.sessions.remove(&id);
    }

    pub fn retain(&mut self, mut keep: impl FnMut(CaptureId) -> bool) {
        self.sessions.retain(|id, _| keep(*id));
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
