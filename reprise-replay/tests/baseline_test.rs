use reprise_codec::Header;
use reprise_replay::{BaselineTracker, SendOutcome, diff_responses};

fn outcome(status: u16, body: &str, duration_ms: u64) -> SendOutcome {
    SendOutcome {
        status,
        status_text: "OK".to_string(),
        http_version: "HTTP/1.1".to_string(),
        headers: vec![Header::new("Content-Type", "text/plain")],
        body: body.to_string(),
        size_bytes: body.len(),
        duration_ms,
    }
}

#[test]
fn first_response_becomes_baseline() {
    let mut tracker = BaselineTracker::new();
    assert!(tracker.observe(&outcome(200, "one", 10)).is_none());
    assert!(tracker.is_set());
    assert_eq!(tracker.baseline().unwrap().body, "one");

    let diff = tracker.observe(&outcome(200, "one", 15)).unwrap();
    assert!(diff.is_identical());
    assert_eq!(diff.duration_delta_ms, 5);
    assert_eq!(tracker.baseline().unwrap().duration_ms, 10);
}

#[test]
fn diff_reports_status_size_and_lines() {
    let diff = diff_responses(&outcome(200, "same\nold", 10), &outcome(403, "same\nnewer", 4));
    assert!(diff.status_changed());
    assert_eq!(diff.baseline_status, 200);
    assert_eq!(diff.status, 403);
    assert_eq!(diff.size_delta, 2);
    assert_eq!(diff.duration_delta_ms, -6);
    assert!(diff.raw.contains("-HTTP/1.1 200 OK\n"));
    assert!(diff.raw.contains("+HTTP/1.1 403 OK\n"));
    assert!(diff.raw.contains(" same\n"));
    assert!(diff.raw.contains("-old\n"));
    assert!(diff.raw.contains("+newer\n"));
    assert_eq!(diff.changed_lines, 4);
}

#[test]
fn reset_clears_baseline() {
    let mut tracker = BaselineTracker::new();
    tracker.observe(&outcome(200, "one", 1));
    tracker.reset();
    assert!(!tracker.is_set());
    assert!(tracker.observe(&outcome(500, "two", 1)).is_none());
    assert_eq!(tracker.baseline().unwrap().status, 500);
}
