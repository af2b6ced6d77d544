use std::path::{Path, PathBuf};

use tracing::{info, warn};

use reprise_capture::{CaptureList, captures_from_json, captures_to_json};
use reprise_fuzzer::{
    AnalysisConfig, Analyzer, AttackType, PayloadProcessing, generate_attack,
    positions_from_template,
};
use reprise_replay::{AttackOutcome, ReplayConfig, ReplayExecutor};
use reprise_web::{CancelToken, Client};

use crate::position::PositionSpec;

pub struct AttackArgs {
    pub template: PathBuf,
    pub attack_type: String,
    pub positions: Vec<PositionSpec>,
    pub https: bool,
    pub dry_run: bool,
    pub max_requests: Option<usize>,
    pub processing: PayloadProcessing,
    pub analysis: AnalysisConfig,
}

fn executor(config: &ReplayConfig) -> ReplayExecutor<Client> {
    ReplayExecutor::new(Client::new(config.client_config()))
        .with_policy(config.outbound.clone())
        .with_throttle(config.throttle())
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))
}

pub async fn send(config: &ReplayConfig, request: &Path, https: bool) -> Result<(), String> {
    let raw = read_file(request)?;
    let outcome = executor(config)
        .send_raw(&raw, https)
        .await
        .map_err(|err| err.to_string())?;
    println!("{}", outcome.formatted());
    println!();
    println!(
        "status {} | {} ms | {} bytes",
        outcome.status, outcome.duration_ms, outcome.size_bytes
    );
    Ok(())
}

pub async fn attack(config: &ReplayConfig, args: AttackArgs) -> Result<(), String> {
    let attack_type = args
        .attack_type
        .parse::<AttackType>()
        .map_err(|err| err.to_string())?;
    let template = read_file(&args.template)?;
    let sources = args
        .positions
        .into_iter()
        .map(PositionSpec::into_source)
        .collect::<Result<Vec<_>, _>>()?;
    let positions = positions_from_template(&template, sources)
        .map_err(|err| err.to_string())?
        .into_iter()
        .map(|position| position.with_processing(args.processing.clone()))
        .collect::<Vec<_>>();
    let limit = args.max_requests.unwrap_or(config.attack.max_requests);
    let requests =
        generate_attack(attack_type, &positions, &template, limit).map_err(|err| err.to_string())?;

    if args.dry_run {
        for (index, request) in requests.iter().enumerate() {
            println!("### {} [{}]", index, request.payloads.join(", "));
            println!("{}", request.request_content);
        }
        return Ok(());
    }

    let analyzer = Analyzer::new(&args.analysis).map_err(|err| err.to_string())?;
    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping after the current request");
            on_interrupt.cancel();
        }
    });

    println!("#\tstatus\tms\tbytes\tpayloads\tnotes");
    let report = executor(config)
        .run_attack(&requests, args.https, &cancel, &analyzer, |outcome| {
            println!("{}", outcome_line(outcome));
        })
        .await;
    interrupt.abort();

    if report.cancelled {
        info!(
            sent = report.outcomes.len(),
            total = requests.len(),
            "attack cancelled"
        );
    }
    Ok(())
}

fn outcome_line(outcome: &AttackOutcome) -> String {
    let status = outcome
        .status
        .map(|status| status.to_string())
        .unwrap_or_else(|| "ERR".to_string());
    let duration = outcome
        .duration_ms
        .map(|ms| ms.to_string())
        .unwrap_or_else(|| "-".to_string());
    let size = outcome
        .size_bytes
        .map(|bytes| bytes.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut notes = Vec::new();
    if let Some(error) = &outcome.error {
        notes.push(error.clone());
    }
    if let Some(analysis) = &outcome.analysis {
        if !analysis.grep_matches.is_empty() {
            notes.push(format!("grep: {}", analysis.grep_matches.join(",")));
        }
        for (index, values) in analysis.extracts.iter().enumerate() {
            if !values.is_empty() {
                notes.push(format!("extract{}: {}", index, values.join(",")));
            }
        }
    }
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        outcome.index,
        status,
        duration,
        size,
        outcome.payloads.join(","),
        notes.join("; ")
    )
}

pub fn dedup(input: &Path, output: Option<&Path>) -> Result<(), String> {
    let captures = captures_from_json(&read_file(input)?).map_err(|err| err.to_string())?;
    let mut list = CaptureList::from_captures(captures);
    let removed = list.remove_duplicates();
    println!("removed {} duplicate(s), {} remaining", removed, list.len());
    if let Some(output) = output {
        let raw = captures_to_json(list.as_slice()).map_err(|err| err.to_string())?;
        std::fs::write(output, raw).map_err(|err| format!("{}: {err}", output.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use reprise_capture::{CapturedRequest, captures_from_json, captures_to_json};
    use reprise_codec::parse_request;
    use reprise_fuzzer::AnalysisResult;
    use reprise_replay::AttackOutcome;

    use super::{dedup, outcome_line};

    fn capture(path: &str) -> CapturedRequest {
        let raw = format!("GET {path} HTTP/1.1\nHost: example.com\n\n");
        let parsed = parse_request(&raw, false).unwrap();
        CapturedRequest::new(parsed.options.url, parsed.request, None)
    }

    #[test]
    fn dedup_writes_unique_captures() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("captures.json");
        let output = dir.path().join("unique.json");
        let captures = vec![capture("/a"), capture("/b"), capture("/a")];
        std::fs::write(&input, captures_to_json(&captures).unwrap()).unwrap();

        dedup(&input, Some(&output)).unwrap();

        let unique = captures_from_json(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let paths: Vec<&str> = unique.iter().map(|c| c.request.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn dedup_reports_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.json");
        std::fs::write(&input, "{not json").unwrap();
        assert!(dedup(&input, None).is_err());
        assert!(dedup(&dir.path().join("missing.json"), None).is_err());
    }

    #[test]
    fn outcome_line_shows_status_and_notes() {
        let outcome = AttackOutcome {
            index: 3,
            payloads: vec!["admin".to_string(), "pass1".to_string()],
            status: Some(302),
            duration_ms: Some(12),
            size_bytes: Some(0),
            error: None,
            analysis: Some(AnalysisResult {
                grep_matches: vec!["Welcome".to_string()],
                extracts: vec![vec!["abc".to_string()]],
            }),
        };
        assert_eq!(
            outcome_line(&outcome),
            "3\t302\t12\t0\tadmin,pass1\tgrep: Welcome; extract0: abc"
        );
    }

    #[test]
    fn outcome_line_marks_errors() {
        let outcome = AttackOutcome {
            index: 0,
            payloads: vec!["x".to_string()],
            error: Some("network error: refused".to_string()),
            ..AttackOutcome::default()
        };
        assert_eq!(
            outcome_line(&outcome),
            "0\tERR\t-\t-\tx\tnetwork error: refused"
        );
    }
}
