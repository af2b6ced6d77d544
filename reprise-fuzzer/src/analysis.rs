use regex::Regex;

use crate::{AnalysisConfig, AnalysisResult, GenerationError};

/// Grep needles and compiled extract patterns, built once per attack run.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    grep: Vec<String>,
    extract: Vec<Regex>,
}

impl Analyzer {
    pub fn new(config: &AnalysisConfig) -> Result<Self, GenerationError> {
        let extract = config
            .extract
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| GenerationError::Analysis(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            grep: config.grep.clone(),
            extract,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.grep.is_empty() && self.extract.is_empty()
    }

    pub fn analyze(&self, body: &[u8]) -> AnalysisResult {
        let text = String::from_utf8_lossy(body);
        let grep_matches = self
            .grep
            .iter()
            .filter(|needle| text.contains(needle.as_str()))
            .cloned()
            .collect();

        let mut extracts = Vec::with_capacity(self.extract.len());
        for regex in &self.extract {
            let mut matches = Vec::new();
            for capture in regex.captures_iter(&text) {
                if capture.len() == 1 {
                    matches.push(capture[0].to_string());
                    continue;
                }
                for idx in 1..capture.len() {
                    if let Some(value) = capture.get(idx) {
                        matches.push(value.as_str().to_string());
                    }
                }
            }
            extracts.push(matches);
        }

        AnalysisResult {
            grep_matches,
            extracts,
        }
    }
}

pub fn analyze_response(
    body: &[u8],
    config: &AnalysisConfig,
) -> Result<AnalysisResult, GenerationError> {
    Ok(Analyzer::new(config)?.analyze(body))
}
