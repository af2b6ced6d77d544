mod entry;
mod navigation;
mod registry;
mod stack;
mod undo;

pub use entry::{HistoryAvailability, HistoryEntry};
pub use navigation::NavigationHistory;
pub use registry::HistoryRegistry;
pub use stack::{HistorySnapshot, HistoryStack};
pub use undo::UndoRedo;
