use std::collections::HashMap;

use reprise_codec::StructuredResponse;
use tracing::debug;

use crate::{CaptureError, CaptureId, CapturedRequest, signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Added(CaptureId),
    DuplicateSkipped,
}

/// Ordered captures in arrival order plus the operator's current selection.
#[derive(Debug, Clone, Default)]
pub struct CaptureList {
    items: Vec<CapturedRequest>,
    next_id: u64,
    selected: Option<CaptureId>,
    skipped_duplicates: usize,
    // signature -> number of stored captures carrying it
    signatures: HashMap<String, usize>,
}

impl CaptureList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_captures(captures: Vec<CapturedRequest>) -> Self {
        let mut list = Self::new();
        for captured in captures {
            list.ingest(captured, false);
        }
        list
    }

    pub fn ingest(&mut self, mut captured: CapturedRequest, dedupe: bool) -> IngestOutcome {
        let key = signature(&captured);
        if dedupe && self.signatures.contains_key(&key) {
            self.skipped_duplicates += 1;
            debug!(url = %captured.url, "duplicate capture skipped");
            return IngestOutcome::DuplicateSkipped;
        }
        *self.signatures.entry(key).or_default() += 1;
        self.next_id += 1;
        let id = CaptureId(self.next_id);
        captured.id = id;
        self.items.push(captured);
        IngestOutcome::Added(id)
    }

    /// Keeps the first of every signature. The selection survives if its item
    /// does, otherwise it is cleared.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.items.len();
        let mut seen = HashMap::new();
        self.items.retain(|item| seen.insert(signature(item), 1).is_none());
        self.signatures = seen;
        let removed = before - self.items.len();
        if let Some(selected) = self.selected {
            if self.get(selected).is_none() {
                self.selected = None;
            }
        }
        debug!(removed, remaining = self.items.len(), "duplicates removed");
        removed
    }

    pub fn delete(&mut self, id: CaptureId) -> Result<CapturedRequest, CaptureError> {
        let index = self.index_of(id).ok_or(CaptureError::UnknownCapture(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        let removed = self.items.remove(index);
        self.forget_signature(&removed);
        Ok(removed)
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        self.signatures.clear();
        self.selected = None;
        removed
    }

    pub fn select(&mut self, id: CaptureId) -> Result<&CapturedRequest, CaptureError> {
        let index = self.index_of(id).ok_or(CaptureError::UnknownCapture(id))?;
        self.selected = Some(id);
        Ok(&self.items[index])
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&CapturedRequest> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn selected_id(&self) -> Option<CaptureId> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.and_then(|id| self.index_of(id))
    }

    pub fn rename(&mut self, id: CaptureId, name: Option<String>) -> Result<(), CaptureError> {
        self.get_mut(id)?.name = name;
        Ok(())
    }

    pub fn set_starred(&mut self, id: CaptureId, starred: bool) -> Result<(), CaptureError> {
        self.get_mut(id)?.starred = starred;
        Ok(())
    }

    pub fn set_color(&mut self, id: CaptureId, color: Option<String>) -> Result<(), CaptureError> {
        self.get_mut(id)?.color = color;
        Ok(())
    }

    pub fn set_current_response(
        &mut self,
        id: CaptureId,
        response: StructuredResponse,
    ) -> Result<(), CaptureError> {
        self.get_mut(id)?.current_response = Some(response);
        Ok(())
    }

    pub fn get(&self, id: CaptureId) -> Option<&CapturedRequest> {
        self.items.iter().find(|item| item.id == id)
    }

    // Not public: the fields a signature reads must not change after ingest.
    fn get_mut(&mut self, id: CaptureId) -> Result<&mut CapturedRequest, CaptureError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CaptureError::UnknownCapture(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedRequest> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[CapturedRequest] {
        &self.items
    }

    pub fn into_captures(self) -> Vec<CapturedRequest> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn skipped_duplicates(&self) -> usize {
        self.skipped_duplicates
    }

    fn forget_signature(&mut self, captured: &CapturedRequest) {
        let key = signature(captured);
        if let Some(count) = self.signatures.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.signatures.remove(&key);
            }
        }
    }

    fn index_of(&self, id: CaptureId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

pub fn captures_from_json(raw: &str) -> Result<Vec<CapturedRequest>, CaptureError> {
    serde_json::from_str(raw).map_err(|err| CaptureError::Decode(err.to_string()))
}

pub fn captures_to_json(captures: &[CapturedRequest]) -> Result<String, CaptureError> {
    serde_json::to_string_pretty(captures).map_err(|err| CaptureError::Decode(err.to_string()))
}
