use super::*;

// ===== legacy completions =====

#[test]
fn completions_prompt_frames_user_query() {
    let prompt = build_completion_prompt("You are an expert.", &[Message::user("Average in 2023?")]);
    assert_eq!(prompt, "You are an expert.\n\nUser query: \"Average in 2023?\"");
}

#[test]
fn completions_prompt_without_system() {
    let prompt = build_completion_prompt("  ", &[Message::user("hi")]);
    assert_eq!(prompt, "User query: \"hi\"");
}

#[test]
fn completions_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-3.5-turbo-instruct",
        "choices": [{ "index": 0, "text": "\n\nSalaries grew.", "finish_reason": "stop" }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 4 }
    })
    .to_string();
    let resp = parse_completions_response(&json).unwrap();
    assert_eq!(resp.text().as_deref(), Some("\n\nSalaries grew."));
    assert_eq!(resp.stop_reason, StopReason::Complete);
    assert_eq!(resp.usage.input, 12);
    assert_eq!(resp.usage.output, 4);
}

#[test]
fn completions_parse_length_finish() {
    let json = serde_json::json!({
        "choices": [{ "text": "truncated", "finish_reason": "length" }]
    })
    .to_string();
    let resp = parse_completions_response(&json).unwrap();
    assert_eq!(resp.stop_reason, StopReason::MaxTokens);
    assert_eq!(resp.model, "");
}

#[test]
fn completions_parse_missing_text_errors() {
    let json = serde_json::json!({ "choices": [{ "message": { "content": "wrong generation" } }] }).to_string();
    let err = parse_completions_response(&json).unwrap_err();
    assert!(err.to_string().contains("choices[0].text"));
}

#[test]
fn completions_parse_missing_choices() {
    let json = serde_json::json!({ "choices": [] }).to_string();
    assert!(parse_completions_response(&json).is_err());
}

// ===== chat completions =====

#[test]
fn cc_messages_prepend_system() {
    let messages = [Message::user("hello")];
    let built = build_chat_completions_messages("be brief", &messages);
    assert_eq!(
        built,
        vec![CcMessage { role: "system", content: "be brief" }, CcMessage { role: "user", content: "hello" }]
    );
}

#[test]
fn cc_messages_skip_blank_system() {
    let messages = [Message::user("hello")];
    let built = build_chat_completions_messages("", &messages);
    assert_eq!(built.len(), 1);
}

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.segments.len(), 1);
    assert_eq!(resp.segments[0], "Hello!");
    assert_eq!(resp.stop_reason, StopReason::Complete);
    assert_eq!(resp.usage.input, 10);
}

#[test]
fn cc_parse_null_content_has_no_text() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "stop" }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text().is_none());
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4o", "choices": [] }).to_string();
    assert!(parse_chat_completions_response(&json).is_err());
}

// ===== responses API =====

#[test]
fn resp_input_serializes_message_items() {
    let messages = [Message::user("hi")];
    let input = build_responses_input(&messages);
    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "type": "message",
            "role": "user",
            "content": [{ "type": "input_text", "text": "hi" }]
        }])
    );
}

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [{
            "type": "message",
            "content": [{ "type": "output_text", "text": "Done!" }]
        }],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.segments.len(), 1);
    assert_eq!(resp.segments[0], "Done!");
    assert_eq!(resp.stop_reason, StopReason::Complete);
    assert_eq!(resp.usage.output, 8);
}

#[test]
fn resp_parse_skips_non_message_items() {
    let json = serde_json::json!({
        "output": [
            { "type": "reasoning", "summary": [] },
            { "type": "message", "content": [{ "type": "output_text", "text": "Answer" }] }
        ]
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text().as_deref(), Some("Answer"));
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output_text": "Fallback text",
        "usage": { "input_tokens": 5, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.segments.len(), 1);
    assert_eq!(resp.segments[0], "Fallback text");
}

#[test]
fn resp_parse_incomplete_max_tokens() {
    let json = serde_json::json!({
        "output": [{ "type": "message", "content": [{ "type": "output_text", "text": "part" }] }],
        "incomplete_details": { "reason": "max_output_tokens" }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.stop_reason, StopReason::MaxTokens);
}

#[test]
fn resp_parse_invalid_json() {
    assert!(matches!(parse_responses_response("{"), Err(LlmError::ApiParse(_))));
}

#[test]
fn from_config_keeps_model_and_mode() {
    let config = LlmConfig {
        api_key: "sk-test".into(),
        model: "gpt-test".into(),
        openai_mode: OpenAiApiMode::Responses,
        openai_base_url: "http://127.0.0.1:9".into(),
        timeouts: crate::llm::config::LlmTimeouts::default(),
    };
    let client = OpenAiClient::from_config(config).unwrap();
    assert_eq!(client.model(), "gpt-test");
    assert_eq!(client.mode(), OpenAiApiMode::Responses);
}
