use reprise_codec as codec;

use crate::{AttackPosition, GenerationError, PayloadProcessing, PayloadSource, TransformStep};

pub fn generate_payloads_for_position(
    position: &AttackPosition,
) -> Result<Vec<String>, GenerationError> {
    generate_capped(position, usize::MAX)
}

/// Number of payloads a position yields, without materializing them.
pub fn payload_count(source: &PayloadSource) -> Result<usize, GenerationError> {
    match source {
        PayloadSource::List { items } => Ok(list_items(items).count()),
        PayloadSource::Numeric { from, to, step } => numeric_count(*from, *to, *step),
    }
}

pub(crate) fn generate_capped(
    position: &AttackPosition,
    cap: usize,
) -> Result<Vec<String>, GenerationError> {
    let raw = match &position.source {
        PayloadSource::List { items } => list_items(items).take(cap).map(str::to_string).collect(),
        PayloadSource::Numeric { from, to, step } => numeric_values(*from, *to, *step, cap)?,
    };
    if position.processing.is_identity() {
        return Ok(raw);
    }
    Ok(raw
        .into_iter()
        .map(|payload| apply_processing(&payload, &position.processing))
        .collect())
}

pub fn apply_processing(payload: &str, processing: &PayloadProcessing) -> String {
    let mut value = format!("{}{}{}", processing.prefix, payload, processing.suffix);
    for step in &processing.transforms {
        value = apply_transform(&value, *step);
    }
    value
}

fn apply_transform(input: &str, step: TransformStep) -> String {
    match step {
        TransformStep::UrlEncode => codec::url_encode_str(input),
        TransformStep::Base64Encode => codec::base64_encode_str(input),
        TransformStep::Base64UrlEncode => codec::base64url_encode_str(input),
        TransformStep::HexEncode => codec::hex_encode_str(input),
        TransformStep::HtmlEscape => codec::html_escape_str(input),
    }
}

fn list_items(items: &str) -> impl Iterator<Item = &str> {
    items
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
}

fn numeric_count(from: i64, to: i64, step: i64) -> Result<usize, GenerationError> {
    validate_range(from, to, step)?;
    let span = (i128::from(to) - i128::from(from)) / i128::from(step);
    Ok(usize::try_from(span + 1).unwrap_or(usize::MAX))
}

fn numeric_values(from: i64, to: i64, step: i64, cap: usize) -> Result<Vec<String>, GenerationError> {
    validate_range(from, to, step)?;
    let (to, step) = (i128::from(to), i128::from(step));
    let mut current = i128::from(from);
    let mut values = Vec::new();
    while values.len() < cap && ((step > 0 && current <= to) || (step < 0 && current >= to)) {
        values.push(current.to_string());
        current += step;
    }
    Ok(values)
}

fn validate_range(from: i64, to: i64, step: i64) -> Result<(), GenerationError> {
    if step == 0 || (step > 0 && from > to) || (step < 0 && from < to) {
        return Err(GenerationError::InvalidRange { from, to, step });
    }
    Ok(())
}
