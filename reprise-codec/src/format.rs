use crate::{Header, StructuredRequest, StructuredResponse};

/// Canonical raw text for a request. `parse_request` reads this back unchanged.
pub fn format_request(request: &StructuredRequest) -> String {
    render_request(request, request.body.as_deref().unwrap_or_default().to_string())
}

/// Raw text for the editor: identical to `format_request` except that JSON
/// bodies are pretty-printed.
pub fn format_request_for_editing(request: &StructuredRequest) -> String {
    let body = request
        .body
        .as_deref()
        .map(pretty_json_or_verbatim)
        .unwrap_or_default();
    render_request(request, body)
}

pub fn format_response(response: &StructuredResponse) -> String {
    let mut lines = Vec::with_capacity(response.headers.len() + 3);
    let status_line = format!(
        "{} {} {}",
        response.http_version, response.status, response.status_text
    );
    lines.push(status_line.trim_end().to_string());
    push_headers(&mut lines, &response.headers);
    lines.push(String::new());
    lines.push(pretty_json_or_verbatim(&response.body));
    lines.join("\n")
}

pub fn pretty_json_or_verbatim(body: &str) -> String {
    let trimmed = body.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return body.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
        Err(_) => body.to_string(),
    }
}

fn render_request(request: &StructuredRequest, body: String) -> String {
    let mut lines = Vec::with_capacity(request.headers.len() + 4);
    lines.push(format!(
        "{} {} {}",
        request.method, request.path, request.http_version
    ));
    lines.push(format!("Host: {}", request.host));
    push_headers(&mut lines, &request.headers);
    lines.push(String::new());
    lines.push(body);
    lines.join("\n")
}

fn push_headers(lines: &mut Vec<String>, headers: &[Header]) {
    for header in headers {
        lines.push(format!("{}: {}", header.name, header.value));
    }
}
