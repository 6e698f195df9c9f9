//! JSON bodies for the API endpoints.
//!
//! Escaping covers `"`, `\`, newline, carriage return and tab only. Every
//! other byte, including other control characters, is copied as-is.

use crate::index::SearchResult;

/// Escape raw bytes for use inside a JSON string literal.
pub fn escape_bytes(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    for &b in input {
        match b {
            b'"' => out.extend_from_slice(b"\\\""),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            _ => out.push(b),
        }
    }
    out
}

/// Escape a string for use inside a JSON string literal.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// `{"results":[{"fileName":..,"filePath":..,"score":0.0000},..]}`
pub fn results_to_json(results: &[SearchResult<'_>]) -> String {
    let items: Vec<String> = results
        .iter()
        .map(|result| {
            format!(
                "{{\"fileName\":\"{}\",\"filePath\":\"{}\",\"score\":{:.4}}}",
                escape(&result.document.file_name),
                escape(&result.document.file_path),
                result.score
            )
        })
        .collect();
    format!("{{\"results\":[{}]}}", items.join(","))
}

/// `{"suggestions":["..",..]}`
pub fn suggestions_to_json(suggestions: &[String]) -> String {
    let items: Vec<String> = suggestions
        .iter()
        .map(|s| format!("\"{}\"", escape(s)))
        .collect();
    format!("{{\"suggestions\":[{}]}}", items.join(","))
}

/// `{"documentCount":N}`
pub fn status_to_json(document_count: usize) -> String {
    format!("{{\"documentCount\":{}}}", document_count)
}

/// `{"content":".."}` over the raw file bytes.
pub fn content_to_json(content: &[u8]) -> Vec<u8> {
    let mut json = b"{\"content\":\"".to_vec();
    json.extend_from_slice(&escape_bytes(content));
    json.extend_from_slice(b"\"}");
    json
}
