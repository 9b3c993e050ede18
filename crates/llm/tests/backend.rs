//! Tests for prompt construction and backend configuration.

use deckcrew_llm::{
    Client, HttpError, HttpProvider, LlmBackend, LlmConfig, ProviderKind, Request, Response, Role,
    endpoint, system_prompt, user_prompt,
};
use std::time::Duration;
use dcore::Persona;

fn planner() -> Persona {
    Persona {
        role: "Content Planner".into(),
        goal: "Plan content on Rust".into(),
        backstory: "You plan slide decks.".into(),
        allow_delegation: false,
        verbose: true,
    }
}

#[test]
fn system_prompt_carries_role_backstory_and_goal() {
    assert_eq!(
        system_prompt(&planner()),
        "You are Content Planner. You plan slide decks.\nYour personal goal is: Plan content on Rust"
    );
}

#[test]
fn system_prompt_skips_empty_fields() {
    let persona = Persona {
        role: "Editor".into(),
        ..Default::default()
    };
    assert_eq!(system_prompt(&persona), "You are Editor.");
}

#[test]
fn user_prompt_appends_expected_output() {
    let prompt = user_prompt("Write a deck.", "A markdown deck.");
    assert!(prompt.starts_with("Write a deck.\n\n"));
    assert!(prompt.contains("expected criteria for your final answer: A markdown deck."));
    assert_eq!(user_prompt("Write a deck.", ""), "Write a deck.");
}

#[test]
fn request_has_system_then_user_message() {
    let config = LlmConfig {
        api_key: "sk-test".into(),
        model: "gpt-4o".into(),
        ..Default::default()
    };
    let backend = LlmBackend::from_config(&config).unwrap();
    let request = backend.request(&planner(), "Plan it.", "");

    assert_eq!(request.model, "gpt-4o");
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[1].role, Role::User);
    assert_eq!(request.messages[1].content, "Plan it.");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["stream"], false);
    assert!(json.get("temperature").is_none());
}

#[test]
fn from_config_uses_provider_endpoint_or_base_url() {
    let deepseek = LlmConfig {
        provider: ProviderKind::DeepSeek,
        api_key: "sk".into(),
        ..Default::default()
    };
    let backend = LlmBackend::from_config(&deepseek).unwrap();
    assert_eq!(backend.provider().endpoint(), endpoint::DEEPSEEK);

    let custom = LlmConfig {
        api_key: "sk".into(),
        base_url: Some("http://proxy.local/v1/chat/completions".into()),
        ..Default::default()
    };
    let backend = LlmBackend::from_config(&custom).unwrap();
    assert_eq!(
        backend.provider().endpoint(),
        "http://proxy.local/v1/chat/completions"
    );
}

#[test]
fn from_config_requires_key_except_for_ollama() {
    assert!(LlmBackend::from_config(&LlmConfig::default()).is_err());

    let ollama = LlmConfig {
        provider: ProviderKind::Ollama,
        ..Default::default()
    };
    let backend = LlmBackend::from_config(&ollama).unwrap();
    assert!(backend.provider().headers().get("authorization").is_none());
}

#[test]
fn response_content_reads_first_choice() {
    let body = r##"{
        "id": "chatcmpl-1",
        "model": "gpt-4o",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": "# Slide 1"}, "finish_reason": "stop"}
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    }"##;
    let response: Response = serde_json::from_str(body).unwrap();
    assert_eq!(response.content(), Some("# Slide 1"));
    assert_eq!(response.usage.unwrap().total_tokens, 15);

    let empty: Response = serde_json::from_str(r#"{"choices": []}"#).unwrap();
    assert_eq!(empty.content(), None);
}

#[test]
fn configured_temperature_reaches_the_request() {
    let config = LlmConfig {
        api_key: "sk".into(),
        temperature: Some(0.5),
        ..Default::default()
    };
    let backend = LlmBackend::from_config(&config).unwrap();
    let json = serde_json::to_value(backend.request(&planner(), "Plan it.", "")).unwrap();
    assert_eq!(json["temperature"], 0.5);
}

#[test]
fn null_content_reads_as_empty() {
    let body = r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]}"#;
    let response: Response = serde_json::from_str(body).unwrap();
    assert_eq!(response.choices.len(), 1);
    assert_eq!(response.content(), None);
}

#[tokio::test]
async fn send_to_closed_port_is_a_retryable_transport_error() {
    let client = Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let provider = HttpProvider::no_auth(client, "http://127.0.0.1:9/v1/chat/completions");
    let request = Request::new("llama3");

    let err = provider.send(&request).await.unwrap_err();
    assert!(matches!(err, HttpError::Transport(_)));
    assert!(err.is_retryable());
}
