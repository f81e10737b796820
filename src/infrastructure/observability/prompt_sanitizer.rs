const MAX_VISIBLE_LENGTH: usize = 100;

/// Sanitizes prompt or transcript text for safe logging: trims, truncates
/// to a preview, and redacts credential-looking substrings.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let preview = match trimmed.char_indices().nth(MAX_VISIBLE_LENGTH) {
        Some((byte_index, _)) => format!(
            "{}... ({} chars total)",
            &trimmed[..byte_index],
            trimmed.chars().count()
        ),
        None => trimmed.to_string(),
    };

    redact_sensitive_patterns(&preview)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("key=", "key=[REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("secret=", "secret=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let end = result[idx + pattern.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + pattern.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
