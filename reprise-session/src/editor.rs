use reprise_capture::CaptureId;
use reprise_history::{HistoryEntry, HistoryStack};

/// The request open in the editor and its histories.
#[derive(Debug, Clone)]
pub struct Editor {
    pub(crate) id: CaptureId,
    pub(crate) stack: HistoryStack,
    pub(crate) text: String,
    pub(crate) use_https: bool,
}

impl Editor {
    pub(crate) fn open(id: CaptureId, stack: HistoryStack, original: &HistoryEntry) -> Self {
        let current = stack.current().unwrap_or(original).clone();
        Self {
            id,
            stack,
            text: current.raw_text,
            use_https: current.use_https,
        }
    }

    pub(crate) fn show(&mut self, entry: Option<HistoryEntry>) -> bool {
        match entry {
            Some(entry) => {
                self.text = entry.raw_text;
                self.use_https = entry.use_https;
                true
            }
            None => false,
        }
    }

    pub fn id(&self) -> CaptureId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn use_https(&self) -> bool {
        self.use_https
    }

    pub fn history(&self) -> &HistoryStack {
        &self.stack
    }
}
