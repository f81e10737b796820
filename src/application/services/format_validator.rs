use crate::domain::FormatViolation;

/// Target word count the soft-constraint scaffold asks the provider for.
pub const SOFT_WORD_LIMIT: usize = 120;

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Checks a free-form rewrite against the requested output shape and
/// reports every deviation. Violations are advisory metadata; the caller
/// never rejects or retries based on them.
pub fn validate_format(text: &str) -> Vec<FormatViolation> {
    let mut violations = Vec::new();

    if count_words(text) > SOFT_WORD_LIMIT {
        violations.push(FormatViolation::WordLimitExceeded);
    }

    if paragraph_count(text) > 1 {
        violations.push(FormatViolation::MultipleParagraphsDetected);
    }

    if text.lines().any(|line| is_list_item(line.trim_start())) {
        violations.push(FormatViolation::ListFormattingDetected);
    }

    violations
}

/// Number of blank-line-separated blocks.
fn paragraph_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_block = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            in_block = false;
        } else if !in_block {
            count += 1;
            in_block = true;
        }
    }

    count
}

fn is_list_item(line: &str) -> bool {
    for marker in ["- ", "* ", "\u{2022} "] {
        if line.starts_with(marker) {
            return true;
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return false;
    }

    let mut rest = line[digits..].chars();
    match rest.next() {
        Some('.') | Some(')') => matches!(rest.next(), None | Some(' ')),
        _ => false,
    }
}
