use serde::{Deserialize, Serialize};

use crate::{HistoryAvailability, HistoryEntry, NavigationHistory, UndoRedo};

/// Both operator-visible histories for the request open in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStack {
    navigation: NavigationHistory,
    edits: UndoRedo,
}

/// Saved form of a [`HistoryStack`], kept while another request is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySnapshot {
    #[serde(default)]
    pub navigation: Vec<HistoryEntry>,
    #[serde(default)]
    pub cursor: usize,
    #[serde(default)]
    pub undo: Vec<HistoryEntry>,
    #[serde(default)]
    pub redo: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub fn new(original: HistoryEntry) -> Self {
        let mut navigation = NavigationHistory::new();
        navigation.add(original.clone());
        Self {
            navigation,
            edits: UndoRedo::with_original(original),
        }
    }

    /// Rebuilds a stack from a snapshot. The captured original is put back at
    /// the bottom of the undo stack when the snapshot lost it.
    pub fn restore(snapshot: HistorySnapshot, original: HistoryEntry) -> Self {
        let HistorySnapshot {
            navigation,
            cursor,
            mut undo,
            redo,
        } = snapshot;

        if undo.first() != Some(&original) {
            undo.insert(0, original.clone());
        }
        let (navigation, cursor) = if navigation.is_empty() {
            (vec![original], 0)
        } else {
            (navigation, cursor)
        };

        Self {
            navigation: NavigationHistory::from_parts(navigation, cursor),
            edits: UndoRedo::from_parts(undo, redo),
        }
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            navigation: self.navigation.entries().to_vec(),
            cursor: self.navigation.cursor(),
            undo: self.edits.undo_entries().to_vec(),
            redo: self.edits.redo_entries().to_vec(),
        }
    }

    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        let added = self.navigation.add(entry.clone());
        let recorded = self.edits.record(entry);
        added || recorded
    }

    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        self.edits.undo()
    }

    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        self.edits.redo()
    }

    pub fn go_back(&mut self) -> Option<&HistoryEntry> {
        self.navigation.go_back()
    }

    pub fn go_forward(&mut self) -> Option<&HistoryEntry> {
        self.navigation.go_forward()
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.edits.current()
    }

    pub fn original(&self) -> Option<&HistoryEntry> {
        self.edits.original()
    }

    pub fn navigation(&self) -> &NavigationHistory {
        &self.navigation
    }

    pub fn edits(&self) -> &UndoRedo {
        &self.edits
    }

    pub fn availability(&self) -> HistoryAvailability {
        HistoryAvailability {
            can_undo: self.edits.can_undo(),
            can_redo: self.edits.can_redo(),
            can_go_back: self.navigation.can_go_back(),
            can_go_forward: self.navigation.can_go_forward(),
        }
    }
}
