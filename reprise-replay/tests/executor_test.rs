use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use assert_matches::assert_matches;
use reprise_codec::{DEFAULT_REPLAY_HEADER, Header, OutboundRequest, ParseError, parse_request};
use reprise_fuzzer::{AnalysisConfig, Analyzer, AttackRequest};
use reprise_replay::{ReplayError, ReplayExecutor, Transport, TransportResponse};
use reprise_web::{CancelToken, RateLimiter};

#[derive(Default)]
struct MockTransport {
    sent: Mutex<Vec<OutboundRequest>>,
    responses: Mutex<VecDeque<Result<TransportResponse, String>>>,
    delay: Duration,
}

impl MockTransport {
    fn with_responses(responses: Vec<Result<TransportResponse, String>>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
            delay: Duration::ZERO,
        }
    }

    fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    fn dispatch(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, String>> + Send {
        self.sent.lock().unwrap().push(request);
        let result = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(response(200, "ok")));
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            result
        }
    }
}

fn response(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        http_version: "HTTP/1.1".to_string(),
        status,
        status_text: "Whatever".to_string(),
        headers: vec![Header::new("Content-Type", "text/plain")],
        body: body.as_bytes().to_vec(),
    }
}

fn attack_request(payload: &str) -> AttackRequest {
    AttackRequest {
        payloads: vec![payload.to_string()],
        request_content: format!("GET /?q={payload} HTTP/1.1\nHost: example.com\n\n"),
    }
}

#[tokio::test]
async fn send_applies_outbound_policy() {
    let executor = ReplayExecutor::new(MockTransport::with_responses(vec![Ok(response(
        200, "héllo",
    ))]));
    let raw = "GET /a HTTP/1.1\nHost: example.com:8443\nIf-None-Match: \"x\"\nCache-Control: max-age=0\nAccept: */*\n\n";
    let parsed = parse_request(raw, true).unwrap();

    let outcome = executor.send(&parsed.request, &parsed.options).await.unwrap();
    assert_eq!(outcome.status, 200);
    assert_eq!(outcome.body, "héllo");
    assert_eq!(outcome.size_bytes, 6);

    let sent = executor.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].host, "example.com");
    assert_eq!(sent[0].port, 8443);
    let names: Vec<&str> = sent[0].headers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Accept", "Cache-Control", "Pragma", DEFAULT_REPLAY_HEADER]);
    assert_eq!(sent[0].headers[1].value, "no-cache");
}

#[tokio::test]
async fn non_success_status_is_an_outcome() {
    let executor = ReplayExecutor::new(MockTransport::with_responses(vec![Ok(response(
        500, "oops",
    ))]));
    let outcome = executor
        .send_raw("GET / HTTP/1.1\nHost: example.com\n\n", false)
        .await
        .unwrap();
    assert_eq!(outcome.status, 500);
    assert!(outcome.formatted().starts_with("HTTP/1.1 500 Whatever\n"));
}

#[tokio::test]
async fn parse_failure_surfaces_before_dispatch() {
    let executor = ReplayExecutor::new(MockTransport::default());
    let result = executor.send_raw("GET / HTTP/1.1\nAccept: */*\n\n", false).await;
    assert_matches!(result, Err(ReplayError::Parse(ParseError::MissingHost)));
    assert!(executor.transport().sent().is_empty());
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let executor =
        ReplayExecutor::new(MockTransport::with_responses(vec![Err("refused".to_string())]));
    let result = executor
        .send_raw("GET / HTTP/1.1\nHost: example.com\n\n", false)
        .await;
    assert_matches!(result, Err(ReplayError::Network(message)) if message == "refused");
}

#[tokio::test]
async fn attack_run_records_errors_and_continues() {
    let executor = ReplayExecutor::new(MockTransport::with_responses(vec![
        Ok(response(200, "a")),
        Err("reset".to_string()),
        Ok(response(404, "ccc")),
    ]));
    let requests = vec![attack_request("1"), attack_request("2"), attack_request("3")];
    let mut seen = Vec::new();

    let report = executor
        .run_attack(
            &requests,
            false,
            &CancelToken::new(),
            &Analyzer::default(),
            |outcome| seen.push(outcome.index),
        )
        .await;

    assert!(!report.cancelled);
    assert_eq!(seen, vec![0, 1, 2]);
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.error_count(), 1);
    assert_eq!(report.outcomes[0].status, Some(200));
    assert_eq!(report.outcomes[1].status, None);
    assert!(report.outcomes[1].error.as_deref().unwrap().contains("reset"));
    assert_eq!(report.outcomes[2].payloads, vec!["3"]);
    assert_eq!(report.outcomes[2].size_bytes, Some(3));
    assert!(report.outcomes[0].analysis.is_none());

    let targets: Vec<String> = executor
        .transport()
        .sent()
        .into_iter()
        .map(|request| request.target)
        .collect();
    assert_eq!(targets, vec!["/?q=1", "/?q=2", "/?q=3"]);
}

#[tokio::test]
async fn malformed_attack_request_is_recorded() {
    let executor = ReplayExecutor::new(MockTransport::default());
    let requests = vec![AttackRequest {
        payloads: vec![String::new()],
        request_content: String::new(),
    }];
    let report = executor
        .run_attack(&requests, false, &CancelToken::new(), &Analyzer::default(), |_| {})
        .await;
    assert_eq!(report.error_count(), 1);
    assert!(executor.transport().sent().is_empty());
}

#[tokio::test]
async fn cancellation_stops_between_requests() {
    let executor = ReplayExecutor::new(MockTransport::default());
    let requests = vec![attack_request("1"), attack_request("2"), attack_request("3")];
    let cancel = CancelToken::new();

    let report = executor
        .run_attack(&requests, false, &cancel, &Analyzer::default(), |_| cancel.cancel())
        .await;

    assert!(report.cancelled);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(executor.transport().sent().len(), 1);
}

#[tokio::test]
async fn cancelled_before_start_sends_nothing() {
    let executor = ReplayExecutor::new(MockTransport::default());
    let cancel = CancelToken::new();
    cancel.cancel();
    let report = executor
        .run_attack(&[attack_request("1")], false, &cancel, &Analyzer::default(), |_| {})
        .await;
    assert!(report.cancelled);
    assert!(report.outcomes.is_empty());
}

#[tokio::test]
async fn analysis_runs_on_each_response() {
    let executor = ReplayExecutor::new(MockTransport::with_responses(vec![
        Ok(response(200, "Welcome admin, id=7")),
        Ok(response(200, "Invalid login")),
    ]));
    let analyzer = Analyzer::new(&AnalysisConfig {
        grep: vec!["Welcome".to_string()],
        extract: vec![r"id=(\d+)".to_string()],
    })
    .unwrap();

    let report = executor
        .run_attack(
            &[attack_request("a"), attack_request("b")],
            false,
            &CancelToken::new(),
            &analyzer,
            |_| {},
        )
        .await;

    let first = report.outcomes[0].analysis.clone().unwrap();
    assert_eq!(first.grep_matches, vec!["Welcome"]);
    assert_eq!(first.extracts, vec![vec!["7".to_string()]]);
    let second = report.outcomes[1].analysis.clone().unwrap();
    assert!(second.grep_matches.is_empty());
}

#[tokio::test(start_paused = true)]
async fn duration_covers_dispatch_only() {
    let transport = MockTransport {
        delay: Duration::from_millis(150),
        ..MockTransport::default()
    };
    let executor = ReplayExecutor::new(transport);
    let parsed = parse_request("GET / HTTP/1.1\nHost: example.com\n\n", false).unwrap();

    let outcome = executor.send(&parsed.request, &parsed.options).await.unwrap();
    assert_eq!(outcome.duration_ms, 150);
}

#[tokio::test(start_paused = true)]
async fn throttle_spaces_attack_requests() {
    let executor = ReplayExecutor::new(MockTransport::default())
        .with_throttle(Some(RateLimiter::from_delay(Duration::from_millis(250))));
    let start = tokio::time::Instant::now();

    let report = executor
        .run_attack(
            &[attack_request("1"), attack_request("2"), attack_request("3")],
            false,
            &CancelToken::new(),
            &Analyzer::default(),
            |_| {},
        )
        .await;

    assert_eq!(report.outcomes.len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(500));
}
