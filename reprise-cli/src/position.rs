use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use reprise_fuzzer::{PayloadSource, TransformStep};

/// `--position` argument: `list:FILE`, `words:a,b,c` or `range:FROM:TO[:STEP]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSpec {
    List(PathBuf),
    Words(Vec<String>),
    Range { from: i64, to: i64, step: i64 },
}

impl FromStr for PositionSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = value
            .split_once(':')
            .ok_or_else(|| format!("expected KIND:VALUE, got {value:?}"))?;
        match kind {
            "list" if !rest.is_empty() => Ok(PositionSpec::List(PathBuf::from(rest))),
            "words" => Ok(PositionSpec::Words(
                rest.split(',')
                    .filter(|word| !word.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            "range" => parse_range(rest),
            _ => Err(format!("unknown position kind in {value:?}")),
        }
    }
}

fn parse_range(rest: &str) -> Result<PositionSpec, String> {
    let parts: Vec<&str> = rest.split(':').collect();
    let number = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|err| format!("bad range bound {part:?}: {err}"))
    };
    match parts.as_slice() {
        [from, to] => Ok(PositionSpec::Range {
            from: number(from)?,
            to: number(to)?,
            step: 1,
        }),
        [from, to, step] => Ok(PositionSpec::Range {
            from: number(from)?,
            to: number(to)?,
            step: number(step)?,
        }),
        _ => Err(format!("expected range:FROM:TO[:STEP], got range:{rest}")),
    }
}

impl PositionSpec {
    pub fn into_source(self) -> Result<PayloadSource, String> {
        match self {
            PositionSpec::List(path) => std::fs::read_to_string(&path)
                .map(PayloadSource::list)
                .map_err(|err| format!("{}: {err}", path.display())),
            PositionSpec::Words(words) => Ok(PayloadSource::words(words)),
            PositionSpec::Range { from, to, step } => Ok(PayloadSource::numeric(from, to, step)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    Url,
    Base64,
    Base64url,
    Hex,
    Html,
}

impl From<Encoding> for TransformStep {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Url => TransformStep::UrlEncode,
            Encoding::Base64 => TransformStep::Base64Encode,
            Encoding::Base64url => TransformStep::Base64UrlEncode,
            Encoding::Hex => TransformStep::HexEncode,
            Encoding::Html => TransformStep::HtmlEscape,
        }
    }
}
