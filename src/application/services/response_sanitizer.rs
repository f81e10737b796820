//! Repair of provider output before any structured parsing.
//!
//! The provider wraps structured payloads in markdown code fences often
//! enough that stripping them is a first-class step, kept separate from
//! parsing so both stay independently testable.

const SNIPPET_LIMIT: usize = 120;

/// Removes markdown code-fence wrapping (and an optional language tag on
/// the opening fence) from a provider response. Applying it to already
/// unfenced text is a no-op beyond trimming, so repeated application
/// always converges.
pub fn strip_fences(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = strip_one_fence(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_one_fence(text: &str) -> String {
    let Some(inner) = text.strip_prefix("```") else {
        return text.to_string();
    };

    let inner = inner.strip_suffix("```").unwrap_or(inner);

    let inner = match inner.split_once('\n') {
        Some((tag, body)) if is_language_tag(tag) => body,
        _ => inner.strip_prefix("json").unwrap_or(inner),
    };

    inner.trim().to_string()
}

fn is_language_tag(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Strict-then-lenient structured parse. The provider sometimes embeds
/// raw control characters (unescaped newlines, tabs) inside string
/// values, which a strict JSON parse rejects; the lenient pass escapes
/// them in place and retries.
pub fn parse_structured(text: &str) -> Result<serde_json::Value, ParseError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            let escaped = escape_control_chars(text);
            if escaped != text {
                if let Ok(value) = serde_json::from_str(&escaped) {
                    return Ok(value);
                }
            }
            Err(ParseError::new(text, strict_err.to_string()))
        }
    }
}

/// Escapes control characters found inside string literals, leaving the
/// rest of the payload untouched.
fn escape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut after_backslash = false;

    for ch in text.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            continue;
        }

        if after_backslash {
            out.push(ch);
            after_backslash = false;
            continue;
        }

        match ch {
            '\\' => {
                out.push(ch);
                after_backslash = true;
            }
            '"' => {
                out.push(ch);
                in_string = false;
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }

    out
}

/// Unrecoverable structured-parse failure. Carries only a truncated,
/// escaped snippet of the payload, never the raw text.
#[derive(Debug, thiserror::Error)]
#[error("structured parse failed: {reason} (snippet: {snippet})")]
pub struct ParseError {
    snippet: String,
    reason: String,
}

impl ParseError {
    fn new(payload: &str, reason: String) -> Self {
        Self {
            snippet: truncated_snippet(payload),
            reason,
        }
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

fn truncated_snippet(payload: &str) -> String {
    let escaped: String = payload
        .chars()
        .take(SNIPPET_LIMIT)
        .flat_map(char::escape_debug)
        .collect();

    if payload.chars().count() > SNIPPET_LIMIT {
        format!("{}...", escaped)
    } else {
        escaped
    }
}
