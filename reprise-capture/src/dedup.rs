use crate::CapturedRequest;

/// `METHOD|URL|headers|body|page`. Headers are lower-cased `name:value` pairs,
/// sorted, so ordering and name case never matter. The origin page is part of
/// the key: the same call made from two pages is kept twice.
pub fn signature(captured: &CapturedRequest) -> String {
    let mut headers: Vec<String> = captured
        .request
        .headers
        .iter()
        .filter(|header| !header.is_pseudo())
        .map(|header| format!("{}:{}", header.name.trim(), header.value.trim()).to_lowercase())
        .collect();
    headers.sort();

    let body = captured.request.body.as_deref().unwrap_or_default().trim();
    let page = captured.page_url.as_deref().unwrap_or_default();
    format!(
        "{}|{}|{}|{}|{}",
        captured.request.method.to_ascii_uppercase(),
        captured.url,
        headers.join("|"),
        body,
        page
    )
}

pub fn is_duplicate(candidate: &CapturedRequest, existing: &[CapturedRequest]) -> bool {
    let wanted = signature(candidate);
    existing.iter().any(|item| signature(item) == wanted)
}
