use parlance::application::services::{count_words, validate_format};
use parlance::domain::FormatViolation;

fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

#[test]
fn given_long_single_paragraph_when_validating_then_reports_word_limit_only() {
    let text = words(150);
    assert_eq!(
        validate_format(&text),
        vec![FormatViolation::WordLimitExceeded]
    );
}

#[test]
fn given_two_blocks_when_validating_then_reports_multiple_paragraphs_only() {
    let text = format!("{}\n\n{}", words(25), words(25));
    assert_eq!(
        validate_format(&text),
        vec![FormatViolation::MultipleParagraphsDetected]
    );
}

#[test]
fn given_bulleted_lines_when_validating_then_reports_list_formatting() {
    let text = "Here are the points:\n- first item\n- second item";
    assert!(validate_format(text).contains(&FormatViolation::ListFormattingDetected));
}

#[test]
fn given_numbered_lines_when_validating_then_reports_list_formatting() {
    let dotted = "1. first\n2. second";
    assert!(validate_format(dotted).contains(&FormatViolation::ListFormattingDetected));

    let parenthesized = "1) first\n2) second";
    assert!(validate_format(parenthesized).contains(&FormatViolation::ListFormattingDetected));
}

#[test]
fn given_clean_short_paragraph_when_validating_then_reports_nothing() {
    let text = "A clean single paragraph that stays well under the word limit.";
    assert_eq!(validate_format(text), Vec::new());
}

#[test]
fn given_exactly_limit_words_when_validating_then_word_limit_not_reported() {
    let text = words(120);
    assert!(!validate_format(&text).contains(&FormatViolation::WordLimitExceeded));
}

#[test]
fn given_decimal_number_at_line_start_when_validating_then_not_a_list() {
    let text = "3.5 stars is a fair rating for this film";
    assert!(!validate_format(text).contains(&FormatViolation::ListFormattingDetected));
}

#[test]
fn given_every_violation_at_once_when_validating_then_all_are_reported() {
    let text = format!("{}\n\n- bullet one\n- bullet two", words(130));
    let violations = validate_format(&text);
    assert!(violations.contains(&FormatViolation::WordLimitExceeded));
    assert!(violations.contains(&FormatViolation::MultipleParagraphsDetected));
    assert!(violations.contains(&FormatViolation::ListFormattingDetected));
}

#[test]
fn given_text_when_counting_words_then_whitespace_tokens_are_counted() {
    assert_eq!(count_words("one  two\tthree\nfour"), 4);
    assert_eq!(count_words(""), 0);
    assert_eq!(count_words("   "), 0);
}
