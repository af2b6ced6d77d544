use tokio::time::Instant;
use tracing::{debug, info, warn};

use reprise_codec::{
    OutboundPolicy, SendOptions, StructuredRequest, decode_body, parse_request, prepare_outbound,
};
use reprise_fuzzer::{Analyzer, AttackRequest};
use reprise_web::{CancelToken, RateLimiter};

use crate::{AttackOutcome, AttackRunReport, ReplayError, SendOutcome, Transport};

pub struct ReplayExecutor<T> {
    transport: T,
    policy: OutboundPolicy,
    throttle: Option<RateLimiter>,
}

impl<T: Transport> ReplayExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: OutboundPolicy::default(),
            throttle: None,
        }
    }

    pub fn with_policy(mut self, policy: OutboundPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Spaces out attack requests. Single sends are never throttled.
    pub fn with_throttle(mut self, throttle: Option<RateLimiter>) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> &OutboundPolicy {
        &self.policy
    }

    pub async fn send(
        &self,
        request: &StructuredRequest,
        options: &SendOptions,
    ) -> Result<SendOutcome, ReplayError> {
        let outbound = prepare_outbound(request, options, &self.policy);
        debug!(method = %outbound.method, url = %options.url, "sending request");

        let started = Instant::now();
        let response = match self.transport.dispatch(outbound).await {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %options.url, error = %err, "send failed");
                return Err(ReplayError::Network(err));
            }
        };
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let encoding = response.header("content-encoding").map(str::to_string);
        let body = match decode_body(encoding.as_deref(), response.body.clone()) {
            Ok(body) => body,
            Err(err) => {
                warn!(url = %options.url, error = %err, "could not decode body, keeping raw bytes");
                response.body
            }
        };

        debug!(
            url = %options.url,
            status = response.status,
            size = body.len(),
            duration_ms,
            "received response"
        );
        Ok(SendOutcome {
            status: response.status,
            status_text: response.status_text,
            http_version: response.http_version,
            headers: response.headers,
            size_bytes: body.len(),
            body: String::from_utf8_lossy(&body).into_owned(),
            duration_ms,
        })
    }

    pub async fn send_raw(&self, raw: &str, use_https: bool) -> Result<SendOutcome, ReplayError> {
        let parsed = parse_request(raw, use_https)?;
        self.send(&parsed.request, &parsed.options).await
    }

    /// Sends `requests` one after another. A failed request is recorded and
    /// the run moves on; `cancel` is honoured before each request.
    pub async fn run_attack<F>(
        &self,
        requests: &[AttackRequest],
        use_https: bool,
        cancel: &CancelToken,
        analyzer: &Analyzer,
        mut observer: F,
    ) -> AttackRunReport
    where
        F: FnMut(&AttackOutcome),
    {
        let mut report = AttackRunReport::default();
        for (index, attack) in requests.iter().enumerate() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            if let Some(throttle) = &self.throttle {
                throttle.acquire().await;
            }

            let mut outcome = AttackOutcome {
                index,
                payloads: attack.payloads.clone(),
                ..AttackOutcome::default()
            };
            match self.send_raw(&attack.request_content, use_https).await {
                Ok(sent) => {
                    outcome.status = Some(sent.status);
                    outcome.duration_ms = Some(sent.duration_ms);
                    outcome.size_bytes = Some(sent.size_bytes);
                    if !analyzer.is_empty() {
                        outcome.analysis = Some(analyzer.analyze(sent.body.as_bytes()));
                    }
                }
                Err(err) => outcome.error = Some(err.to_string()),
            }
            observer(&outcome);
            report.outcomes.push(outcome);
        }

        info!(
            total = requests.len(),
            sent = report.outcomes.len(),
            errors = report.error_count(),
            cancelled = report.cancelled,
            "attack run finished"
        );
        report
    }
}
