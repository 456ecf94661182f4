use polyvoice::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, TracingConfig, sanitize_prompt,
};

#[test]
fn given_empty_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt(""), "[EMPTY]");
    assert_eq!(sanitize_prompt(" \n "), "[EMPTY]");
}

#[test]
fn given_short_instruction_when_sanitizing_then_returns_unchanged() {
    let prompt = "Synthesize the following conversation clearly and naturally.";
    assert_eq!(sanitize_prompt(prompt), prompt);
}

#[test]
fn given_long_transcript_when_sanitizing_then_truncates_with_length() {
    let prompt = "b".repeat(250);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"b".repeat(100)));
    assert!(result.ends_with("... (250 chars total)"));
}

#[test]
fn given_multibyte_text_past_limit_when_sanitizing_then_cuts_on_char_boundary() {
    let prompt = "é".repeat(120);
    let result = sanitize_prompt(&prompt);
    assert!(result.starts_with(&"é".repeat(100)));
    assert!(result.contains("(120 chars total)"));
}

#[test]
fn given_multiline_script_when_sanitizing_then_it_is_flattened() {
    let result = sanitize_prompt("Speaker 1: Hi.\nSpeaker 2: Hey.");
    assert_eq!(result, "Speaker 1: Hi. Speaker 2: Hey.");
}

#[test]
fn given_credentials_in_text_when_sanitizing_then_values_are_redacted() {
    let result = sanitize_prompt("x-goog-api-key: AIzaSecret and url ?key=AIzaOther&alt=json");
    assert!(!result.contains("AIzaSecret"));
    assert!(!result.contains("AIzaOther"));
    assert!(result.contains("key=[REDACTED]&alt=json"));

    let bearer = sanitize_prompt("Authorization: Bearer sk-abc123");
    assert_eq!(bearer, "Authorization: Bearer [REDACTED]");
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_request_id_when_created_then_exposes_value() {
    let request_id = RequestId("req-123".to_string());
    assert_eq!(request_id.as_str(), "req-123");
    assert_eq!(request_id.clone(), request_id);
}

#[test]
fn given_level_when_building_tracing_config_then_crate_filter_is_appended() {
    let config = TracingConfig::from_level("production", "warn", true);
    assert_eq!(config.environment, "production");
    assert!(config.json_format);
    assert!(config.default_filter.starts_with("warn,"));
    assert!(config.default_filter.contains("polyvoice=debug"));
}

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
}
