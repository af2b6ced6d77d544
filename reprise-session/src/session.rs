use tracing::{debug, info};

use reprise_capture::{CaptureId, CaptureList, CapturedRequest, IngestOutcome};
use reprise_codec::{ParsedRequest, parse_request_with_fallback};
use reprise_fuzzer::{
    AnalysisConfig, Analyzer, AttackPosition, AttackRequest, AttackType, PayloadSource,
    generate_attack, positions_from_template,
};
use reprise_history::{HistoryAvailability, HistoryEntry, HistoryRegistry};
use reprise_replay::{
    AttackOutcome, AttackRunReport, BaselineTracker, ReplayConfig, ReplayExecutor, ResponseDiff,
    SendOutcome, Transport,
};
use reprise_web::CancelToken;

use crate::{Editor, SessionError};

/// A send that has been started but not completed. Returned by
/// [`Session::begin_send`]; hand it back to [`Session::finish_send`].
#[derive(Debug)]
pub struct SendTicket {
    id: CaptureId,
    parsed: ParsedRequest,
}

impl SendTicket {
    pub fn capture_id(&self) -> CaptureId {
        self.id
    }

    pub fn parsed(&self) -> &ParsedRequest {
        &self.parsed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentResponse {
    pub outcome: SendOutcome,
    /// Diff against the baseline. `None` when this response became the baseline
    /// or baselines are off.
    pub diff: Option<ResponseDiff>,
}

/// All state of one operator session.
pub struct Session<T> {
    captures: CaptureList,
    histories: HistoryRegistry,
    editor: Option<Editor>,
    baseline: BaselineTracker,
    baseline_enabled: bool,
    in_flight: Option<CaptureId>,
    executor: ReplayExecutor<T>,
    config: ReplayConfig,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, config: ReplayConfig) -> Self {
        let executor = ReplayExecutor::new(transport)
            .with_policy(config.outbound.clone())
            .with_throttle(config.throttle());
        Self {
            captures: CaptureList::new(),
            histories: HistoryRegistry::new(),
            editor: None,
            baseline: BaselineTracker::new(),
            baseline_enabled: true,
            in_flight: None,
            executor,
            config,
        }
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    pub fn executor(&self) -> &ReplayExecutor<T> {
        &self.executor
    }

    pub fn captures(&self) -> &CaptureList {
        &self.captures
    }

    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    pub fn baseline(&self) -> &BaselineTracker {
        &self.baseline
    }

    pub fn set_baseline_enabled(&mut self, enabled: bool) {
        self.baseline_enabled = enabled;
        if !enabled {
            self.baseline.reset();
        }
    }

    pub fn ingest(&mut self, captured: CapturedRequest) -> IngestOutcome {
        self.captures
            .ingest(captured, self.config.capture.dedupe_on_ingest)
    }

    /// Opens `id` in the editor. The previous request's history is saved and
    /// the baseline starts over.
    pub fn select(&mut self, id: CaptureId) -> Result<&Editor, SessionError> {
        let captured = self
            .captures
            .select(id)
            .map_err(|_| SessionError::UnknownCapture(id))?;
        let original = HistoryEntry::new(captured.editable_text(), captured.use_https());

        let reselected = self.editor.as_ref().is_some_and(|editor| editor.id == id);
        if let Some(previous) = self.editor.take() {
            self.histories.save(previous.id, &previous.stack);
        }
        let stack = self.histories.open(id, original.clone());
        if !reselected {
            self.baseline.reset();
        }
        debug!(capture = %id, "request selected");
        Ok(&*self.editor.insert(Editor::open(id, stack, &original)))
    }

    pub fn edit(&mut self, raw_text: impl Into<String>, use_https: bool) -> Result<bool, SessionError> {
        let editor = self.editor.as_mut().ok_or(SessionError::NoSelection)?;
        let entry = HistoryEntry::new(raw_text, use_https);
        let recorded = editor.stack.record(entry.clone());
        editor.show(Some(entry));
        Ok(recorded)
    }

    pub fn undo(&mut self) -> Result<bool, SessionError> {
        let editor = self.editor.as_mut().ok_or(SessionError::NoSelection)?;
        let entry = editor.stack.undo().cloned();
        Ok(editor.show(entry))
    }

    pub fn redo(&mut self) -> Result<bool, SessionError> {
        let editor = self.editor.as_mut().ok_or(SessionError::NoSelection)?;
        let entry = editor.stack.redo().cloned();
        Ok(editor.show(entry))
    }

    pub fn go_back(&mut self) -> Result<bool, SessionError> {
        let editor = self.editor.as_mut().ok_or(SessionError::NoSelection)?;
        let entry = editor.stack.go_back().cloned();
        Ok(editor.show(entry))
    }

    pub fn go_forward(&mut self) -> Result<bool, SessionError> {
        let editor = self.editor.as_mut().ok_or(SessionError::NoSelection)?;
        let entry = editor.stack.go_forward().cloned();
        Ok(editor.show(entry))
    }

    pub fn availability(&self) -> HistoryAvailability {
        self.editor
            .as_ref()
            .map(|editor| editor.stack.availability())
            .unwrap_or_default()
    }

    /// Parses the editor text and marks a send as in flight.
    pub fn begin_send(&mut self) -> Result<SendTicket, SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::SendInFlight);
        }
        let editor = self.editor.as_ref().ok_or(SessionError::NoSelection)?;
        let fallback_url = self.captures.get(editor.id).map(|captured| captured.url.as_str());
        let parsed = parse_request_with_fallback(&editor.text, editor.use_https, fallback_url)
            .map_err(reprise_replay::ReplayError::from)?;
        self.in_flight = Some(editor.id);
        Ok(SendTicket {
            id: editor.id,
            parsed,
        })
    }

    /// Clears the in-flight mark and records the result on the capture.
    pub fn finish_send(
        &mut self,
        ticket: SendTicket,
        result: Result<SendOutcome, reprise_replay::ReplayError>,
    ) -> Result<SentResponse, SessionError> {
        self.in_flight = None;
        let outcome = result?;
        // The capture may have been deleted while the send was out.
        if self.captures.get(ticket.id).is_some() {
            self.captures
                .set_current_response(ticket.id, outcome.to_response())
                .map_err(|_| SessionError::UnknownCapture(ticket.id))?;
        }
        let selected = self.editor.as_ref().map(Editor::id) == Some(ticket.id);
        let diff = if self.baseline_enabled && selected {
            self.baseline.observe(&outcome)
        } else {
            None
        };
        Ok(SentResponse { outcome, diff })
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub async fn send_current(&mut self) -> Result<SentResponse, SessionError> {
        let ticket = self.begin_send()?;
        let result = {
            // Released even when this future is dropped mid-send.
            let _in_flight = InFlight(&mut self.in_flight);
            self.executor
                .send(&ticket.parsed.request, &ticket.parsed.options)
                .await
        };
        self.finish_send(ticket, result)
    }

    pub fn remove_duplicates(&mut self) -> usize {
        let removed = self.captures.remove_duplicates();
        let captures = &self.captures;
        self.histories.retain(|id| captures.get(id).is_some());
        self.close_editor_if_gone();
        info!(removed, "duplicate captures removed");
        removed
    }

    pub fn delete(&mut self, id: CaptureId) -> Result<CapturedRequest, SessionError> {
        let removed = self
            .captures
            .delete(id)
            .map_err(|_| SessionError::UnknownCapture(id))?;
        self.histories.forget(id);
        self.close_editor_if_gone();
        Ok(removed)
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.captures.clear();
        self.histories.clear();
        self.editor = None;
        self.baseline.reset();
        removed
    }

    pub fn prepare_attack(
        &self,
        attack_type: &str,
        template: &str,
        sources: Vec<PayloadSource>,
    ) -> Result<Vec<AttackRequest>, SessionError> {
        let attack_type = attack_type.parse::<AttackType>()?;
        let positions = positions_from_template(template, sources)?;
        self.prepare_attack_positions(attack_type, template, &positions)
    }

    pub fn prepare_attack_positions(
        &self,
        attack_type: AttackType,
        template: &str,
        positions: &[AttackPosition],
    ) -> Result<Vec<AttackRequest>, SessionError> {
        Ok(generate_attack(
            attack_type,
            positions,
            template,
            self.config.attack.max_requests,
        )?)
    }

    pub async fn run_attack<F>(
        &self,
        requests: &[AttackRequest],
        use_https: bool,
        cancel: &CancelToken,
        analysis: &AnalysisConfig,
        observer: F,
    ) -> Result<AttackRunReport, SessionError>
    where
        F: FnMut(&AttackOutcome),
    {
        let analyzer = Analyzer::new(analysis)?;
        Ok(self
            .executor
            .run_attack(requests, use_https, cancel, &analyzer, observer)
            .await)
    }

    fn close_editor_if_gone(&mut self) {
        let gone = self
            .editor
            .as_ref()
            .is_some_and(|editor| self.captures.get(editor.id).is_none());
        if gone {
            self.editor = None;
            self.baseline.reset();
        }
    }
}

struct InFlight<'a>(&'a mut Option<CaptureId>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = None;
    }
}
