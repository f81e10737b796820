use regex::Regex;
use std::sync::LazyLock;

static LOOKUP_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").unwrap());

/// Extracts `[[term]]` lookup markers from a prompt, in order of first
/// appearance, de-duplicated and truncated at `cap`.
pub fn extract_markers(text: &str, cap: usize) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for captures in LOOKUP_MARKER.captures_iter(text) {
        if terms.len() >= cap {
            break;
        }
        let term = captures[1].trim().to_string();
        if term.is_empty() || terms.contains(&term) {
            continue;
        }
        terms.push(term);
    }

    terms
}
