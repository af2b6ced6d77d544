use reprise_capture::CaptureId;
use reprise_history::{HistoryEntry, HistoryRegistry, HistorySnapshot, HistoryStack};

fn entry(text: &str) -> HistoryEntry {
    HistoryEntry::new(text, true)
}

#[test]
fn fresh_stack_starts_at_original() {
    let stack = HistoryStack::new(entry("GET / HTTP/1.1"));
    let availability = stack.availability();
    assert!(!availability.can_undo);
    assert!(!availability.can_redo);
    assert!(!availability.can_go_back);
    assert!(!availability.can_go_forward);
    assert_eq!(stack.current(), Some(&entry("GET / HTTP/1.1")));
}

#[test]
fn record_feeds_both_histories() {
    let mut stack = HistoryStack::new(entry("v0"));
    stack.record(entry("v1"));
    stack.record(entry("v2"));
    let availability = stack.availability();
    assert!(availability.can_undo);
    assert!(availability.can_go_back);

    assert_eq!(stack.undo().map(|e| e.raw_text.as_str()), Some("v1"));
    assert_eq!(stack.navigation().entries().len(), 3);
    assert_eq!(stack.go_back().map(|e| e.raw_text.as_str()), Some("v1"));
}

#[test]
fn restore_reinserts_missing_original() {
    let snapshot = HistorySnapshot {
        navigation: Vec::new(),
        cursor: 7,
        undo: vec![entry("v1"), entry("v2")],
        redo: Vec::new(),
    };
    let mut stack = HistoryStack::restore(snapshot, entry("v0"));
    assert_eq!(stack.original(), Some(&entry("v0")));
    assert_eq!(stack.edits().undo_entries().len(), 3);
    assert_eq!(stack.navigation().entries(), &[entry("v0")]);
    assert_eq!(stack.navigation().cursor(), 0);

    stack.undo();
    stack.undo();
    assert_eq!(stack.current(), Some(&entry("v0")));
    assert!(stack.undo().is_none());
}

#[test]
fn restore_keeps_complete_snapshot() {
    let mut stack = HistoryStack::new(entry("v0"));
    stack.record(entry("v1"));
    stack.undo();
    let snapshot = stack.snapshot();

    let restored = HistoryStack::restore(snapshot.clone(), entry("v0"));
    assert_eq!(restored.snapshot(), snapshot);
    assert!(restored.availability().can_redo);
}

#[test]
fn snapshot_survives_serialization() {
    let mut stack = HistoryStack::new(entry("v0"));
    stack.record(entry("v1"));
    let raw = serde_json::to_string(&stack.snapshot()).unwrap();
    let snapshot: HistorySnapshot = serde_json::from_str(&raw).unwrap();
    assert_eq!(HistoryStack::restore(snapshot, entry("v0")), stack);

    let partial: HistorySnapshot = serde_json::from_str("{\"undo\": []}").unwrap();
    let restored = HistoryStack::restore(partial, entry("v0"));
    assert_eq!(restored, HistoryStack::new(entry("v0")));
}

#[test]
fn registry_restores_per_capture() {
    let mut registry = HistoryRegistry::new();
    let first = CaptureId(1);
    let second = CaptureId(2);

    let mut stack = registry.open(first, entry("first"));
    stack.record(entry("first edited"));
    registry.save(first, &stack);

    let other = registry.open(second, entry("second"));
    assert_eq!(other.current(), Some(&entry("second")));

    let reopened = registry.open(first, entry("first"));
    assert_eq!(reopened.current(), Some(&entry("first edited")));
    assert!(!registry.contains(first));

    registry.save(first, &reopened);
    registry.save(second, &other);
    registry.retain(|id| id != first);
    assert_eq!(registry.len(), 1);
}
