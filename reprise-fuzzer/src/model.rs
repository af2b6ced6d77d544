use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::GenerationError;

pub const DEFAULT_MAX_REQUESTS: usize = 10_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AttackType {
    /// One position at a time, the others keep their captured value.
    Sniper,
    /// The first position's payloads, written into every position.
    BatteringRam,
    /// Positions advance together; stops at the shortest list.
    Pitchfork,
    /// Every combination, first position varies slowest.
    ClusterBomb,
}

impl AttackType {
    pub fn all() -> &'static [AttackType] {
        &[
            AttackType::Sniper,
            AttackType::BatteringRam,
            AttackType::Pitchfork,
            AttackType::ClusterBomb,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttackType::Sniper => "sniper",
            AttackType::BatteringRam => "battering-ram",
            AttackType::Pitchfork => "pitchfork",
            AttackType::ClusterBomb => "cluster-bomb",
        }
    }
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttackType {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "sniper" => Ok(AttackType::Sniper),
            "battering-ram" | "batteringram" => Ok(AttackType::BatteringRam),
            "pitchfork" => Ok(AttackType::Pitchfork),
            "cluster-bomb" | "clusterbomb" => Ok(AttackType::ClusterBomb),
            _ => Err(GenerationError::UnknownAttackType(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayloadSource {
    /// Newline-delimited literals; blank lines are skipped.
    List { items: String },
    /// `from, from + step, ...` up to and including `to`.
    Numeric { from: i64, to: i64, step: i64 },
}

impl PayloadSource {
    pub fn list(items: impl Into<String>) -> Self {
        PayloadSource::List {
            items: items.into(),
        }
    }

    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = words
            .into_iter()
            .map(|word| word.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        PayloadSource::List { items }
    }

    pub fn numeric(from: i64, to: i64, step: i64) -> Self {
        PayloadSource::Numeric { from, to, step }
    }
}

impl Default for PayloadSource {
    fn default() -> Self {
        PayloadSource::list(String::new())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransformStep {
    UrlEncode,
    Base64Encode,
    Base64UrlEncode,
    HexEncode,
    HtmlEscape,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PayloadProcessing {
    pub prefix: String,
    pub suffix: String,
    pub transforms: Vec<TransformStep>,
}

impl PayloadProcessing {
    pub fn is_identity(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty() && self.transforms.is_empty()
    }
}

/// A `§…§` span found in a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkerSpan {
    pub index: usize,
    pub span: Range<usize>,
    pub original: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackPosition {
    pub index: usize,
    pub span: Range<usize>,
    pub original: String,
    pub source: PayloadSource,
    #[serde(default)]
    pub processing: PayloadProcessing,
}

impl AttackPosition {
    pub fn from_marker(marker: MarkerSpan, source: PayloadSource) -> Self {
        Self {
            index: marker.index,
            span: marker.span,
            original: marker.original,
            source,
            processing: PayloadProcessing::default(),
        }
    }

    pub fn with_processing(mut self, processing: PayloadProcessing) -> Self {
        self.processing = processing;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackRequest {
    pub payloads: Vec<String>,
    pub request_content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub grep: Vec<String>,
    pub extract: Vec<String>,
}

impl AnalysisConfig {
    pub fn is_empty(&self) -> bool {
        self.grep.is_empty() && self.extract.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub grep_matches: Vec<String>,
    pub extracts: Vec<Vec<String>>,
}
