use crate::{AttackPosition, GenerationError, MarkerSpan, PayloadSource};

pub const MARKER: char = '§';

pub fn scan_positions(template: &str) -> Result<Vec<MarkerSpan>, GenerationError> {
    let offsets: Vec<usize> = template
        .char_indices()
        .filter(|(_, ch)| *ch == MARKER)
        .map(|(offset, _)| offset)
        .collect();
    if offsets.len() % 2 != 0 {
        let dangling = offsets.last().copied().unwrap_or_default();
        return Err(GenerationError::UnterminatedMarker(dangling));
    }

    let width = MARKER.len_utf8();
    Ok(offsets
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| MarkerSpan {
            index,
            span: pair[0]..pair[1] + width,
            original: template[pair[0] + width..pair[1]].to_string(),
        })
        .collect())
}

/// Pairs each marker with a payload source by position. Markers without a
/// source get an empty list.
pub fn positions_from_template(
    template: &str,
    sources: Vec<PayloadSource>,
) -> Result<Vec<AttackPosition>, GenerationError> {
    let markers = scan_positions(template)?;
    let mut sources = sources.into_iter();
    Ok(markers
        .into_iter()
        .map(|marker| AttackPosition::from_marker(marker, sources.next().unwrap_or_default()))
        .collect())
}

/// Substitutes markers left to right with `payloads[0]`, `payloads[1]`, ...
/// A missing payload becomes the empty string; a dangling marker is kept.
pub fn replace_positions(template: &str, payloads: &[String]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut index = 0;
    while let Some(open) = rest.find(MARKER) {
        let after_open = &rest[open + MARKER.len_utf8()..];
        let Some(close) = after_open.find(MARKER) else {
            break;
        };
        output.push_str(&rest[..open]);
        output.push_str(payloads.get(index).map(String::as_str).unwrap_or_default());
        index += 1;
        rest = &after_open[close + MARKER.len_utf8()..];
    }
    output.push_str(rest);
    output
}

/// The template with every marker replaced by its captured value.
pub fn strip_markers(template: &str) -> Result<String, GenerationError> {
    let originals: Vec<String> = scan_positions(template)?
        .into_iter()
        .map(|marker| marker.original)
        .collect();
    Ok(replace_positions(template, &originals))
}
