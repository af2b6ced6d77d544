use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

use crate::SendOutcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseDiff {
    pub baseline_status: u16,
    pub status: u16,
    pub size_delta: i64,
    pub duration_delta_ms: i64,
    pub changed_lines: usize,
    /// Unified line diff of the formatted responses, one prefix char per line.
    pub raw: String,
}

impl ResponseDiff {
    pub fn status_changed(&self) -> bool {
        self.baseline_status != self.status
    }

    pub fn is_identical(&self) -> bool {
        self.changed_lines == 0 && !self.status_changed()
    }
}

/// Holds the first successful response for the selected request.
#[derive(Debug, Clone, Default)]
pub struct BaselineTracker {
    baseline: Option<SendOutcome>,
}

impl BaselineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `outcome` as the baseline if none is set yet and returns `None`;
    /// otherwise returns the diff against the baseline.
    pub fn observe(&mut self, outcome: &SendOutcome) -> Option<ResponseDiff> {
        match &self.baseline {
            Some(baseline) => Some(diff_responses(baseline, outcome)),
            None => {
                self.baseline = Some(outcome.clone());
                None
            }
        }
    }

    pub fn baseline(&self) -> Option<&SendOutcome> {
        self.baseline.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

pub fn diff_responses(baseline: &SendOutcome, current: &SendOutcome) -> ResponseDiff {
    let (raw, changed_lines) = build_raw_diff(&baseline.formatted(), &current.formatted());
    ResponseDiff {
        baseline_status: baseline.status,
        status: current.status,
        size_delta: signed(current.size_bytes) - signed(baseline.size_bytes),
        duration_delta_ms: signed(current.duration_ms) - signed(baseline.duration_ms),
        changed_lines,
        raw,
    }
}

fn signed<N: TryInto<i64>>(value: N) -> i64 {
    value.try_into().unwrap_or(i64::MAX)
}

fn build_raw_diff(left: &str, right: &str) -> (String, usize) {
    let diff = TextDiff::from_lines(left, right);
    let mut output = String::new();
    let mut changed = 0;
    for change in diff.iter_all_changes() {
        let prefix = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        if change.tag() != ChangeTag::Equal {
            changed += 1;
        }
        output.push_str(prefix);
        output.push_str(change.value());
        if !change.value().ends_with('\n') {
            output.push('\n');
        }
    }
    (output, changed)
}
