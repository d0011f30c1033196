use rxscribe::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_text_when_sanitizing_then_marks_empty() {
    assert_eq!(sanitize_prompt("   \n"), "[EMPTY]");
}

#[test]
fn given_short_text_when_sanitizing_then_returns_trimmed_text() {
    assert_eq!(sanitize_prompt("  fever and cough "), "fever and cough");
}

#[test]
fn given_long_text_when_sanitizing_then_truncates_with_total_length() {
    let text = "a".repeat(150);

    let sanitized = sanitize_prompt(&text);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_text_over_limit_when_sanitizing_then_cuts_on_char_boundary() {
    let text = "é".repeat(120);

    let sanitized = sanitize_prompt(&text);

    assert!(sanitized.ends_with("... (120 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_redacts_them() {
    let sanitized = sanitize_prompt("Authorization: Bearer abc123 api_key=xyz sk-abcdefghijklmnop");

    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("xyz"));
    assert!(!sanitized.contains("sk-abcdefghijklmnop"));
    assert!(sanitized.contains("[REDACTED]"));
}
