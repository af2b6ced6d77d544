use serde::{Deserialize, Serialize};

use crate::HistoryEntry;

/// Undo/redo over editor text. The bottom of the undo stack is the captured
/// original and is never popped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UndoRedo {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl UndoRedo {
    pub fn with_original(original: HistoryEntry) -> Self {
        Self {
            undo: vec![original],
            redo: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        if self.undo.last() == Some(&entry) {
            return false;
        }
        self.undo.push(entry);
        self.redo.clear();
        true
    }

    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        let entry = self.undo.pop()?;
        self.redo.push(entry);
        self.undo.last()
    }

    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push(entry);
        self.undo.last()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.undo.last()
    }

    pub fn original(&self) -> Option<&HistoryEntry> {
        self.undo.first()
    }

    pub fn undo_entries(&self) -> &[HistoryEntry] {
        &self.undo
    }

    pub fn redo_entries(&self) -> &[HistoryEntry] {
        &self.redo
    }

    pub(crate) fn from_parts(undo: Vec<HistoryEntry>, redo: Vec<HistoryEntry>) -> Self {
        Self { undo, redo }
    }
}
