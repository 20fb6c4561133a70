//! OpenAI-compatible transport against a local mock server.

mod common;

use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;
use wayfarer::agent::{AgentConfiguration, AgentSession, Prompt, RunOptions, DEFAULT_INSTRUCTIONS};
use wayfarer::config::{Credential, ProviderSettings};
use wayfarer::error::WayfarerError;
use wayfarer::provider::openai::OpenAiProvider;
use wayfarer::tools::travel_tools;

fn sse(events: &[serde_json::Value]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str(&format!("data: {event}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn text_chunk(text: &str) -> serde_json::Value {
    json!({"choices": [{"index": 0, "delta": {"content": text}}]})
}

fn finish_chunk(reason: &str) -> serde_json::Value {
    json!({"choices": [{"index": 0, "delta": {}, "finish_reason": reason}]})
}

fn sse_response(events: &[serde_json::Value]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(sse(events))
}

fn session_for(server: &MockServer, token: &str) -> AgentSession {
    let settings = ProviderSettings::new(server.uri(), "openai/gpt-5-mini", Credential::new(token));
    let config = AgentConfiguration::new(DEFAULT_INSTRUCTIONS, travel_tools().unwrap(), settings);
    AgentSession::connect(config).expect("valid settings")
}

async fn drain(session: &AgentSession, prompt: &Prompt) -> (Vec<String>, Option<WayfarerError>) {
    let mut stream = session.run(prompt, RunOptions::new()).expect("run starts");
    let mut fragments = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) => fragments.push(fragment),
            Err(err) => return (fragments, Some(err)),
        }
    }
    (fragments, None)
}

#[tokio::test]
async fn streams_text_fragments_from_sse() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer ghp_test"))
        .and(body_string_contains("\"stream\":true"))
        .and(body_string_contains("get_random_destination"))
        .respond_with(sse_response(&[
            text_chunk("Par"),
            text_chunk("is is "),
            text_chunk("lovely"),
            finish_chunk("stop"),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, "ghp_test");
    let (fragments, err) = drain(&session, &Prompt::for_destination(Some("Paris"))).await;

    assert!(err.is_none(), "{err:?}");
    assert_eq!(fragments, vec!["Par", "is is ", "lovely"]);
}

#[tokio::test]
async fn tool_call_round_trip_over_http() {
    let server = MockServer::start().await;

    // Second request: carries the tool result, model answers in text.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("tool_call_id"))
        .and(body_string_contains("may be unavailable or disrupted"))
        .respond_with(sse_response(&[
            text_chunk("Heads up: flights to Kyiv may be disrupted."),
            finish_chunk("stop"),
        ]))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    // First request: the model asks for an advisory, arguments split over two chunks.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(sse_response(&[
            json!({"choices": [{"index": 0, "delta": {"tool_calls": [{
                "index": 0,
                "id": "call_1",
                "type": "function",
                "function": {"name": "check_flight_availability", "arguments": "{\"destination\":"}
            }]}}]}),
            json!({"choices": [{"index": 0, "delta": {"tool_calls": [{
                "index": 0,
                "function": {"arguments": " \"Kyiv, Ukraine\"}"}
            }]}}]}),
            finish_chunk("tool_calls"),
        ]))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, "ghp_test");
    let (fragments, err) = drain(&session, &Prompt::for_destination(Some("Kyiv, Ukraine"))).await;

    assert!(err.is_none(), "{err:?}");
    assert_eq!(fragments.concat(), "Heads up: flights to Kyiv may be disrupted.");
}

#[tokio::test]
async fn final_line_without_newline_is_not_lost() {
    let server = MockServer::start().await;
    let body = format!(
        "data: {}\n\ndata: {}",
        text_chunk("Day 1: "),
        json!({"choices": [{"index": 0, "delta": {"content": "Lviv old town."}, "finish_reason": "stop"}]}),
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, "ghp_test");
    let (fragments, err) = drain(&session, &Prompt::for_destination(Some("Lviv"))).await;

    assert!(err.is_none(), "{err:?}");
    assert_eq!(fragments, vec!["Day 1: ", "Lviv old town."]);
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": {"message": "Bad credentials"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, "ghp_revoked");
    let (fragments, err) = drain(&session, &Prompt::for_destination(None)).await;

    assert!(fragments.is_empty());
    let err = err.expect("api error");
    assert!(err.is_transport());
    match err {
        WayfarerError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_event_mid_stream_fails_the_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(sse_response(&[
            text_chunk("Day 1: "),
            json!({"error": {"message": "upstream reset"}}),
        ]))
        .mount(&server)
        .await;

    let session = session_for(&server, "ghp_test");
    let (_, err) = drain(&session, &Prompt::for_destination(None)).await;

    let err = err.expect("stream error");
    assert!(err.is_transport());
    assert!(matches!(err, WayfarerError::Stream(ref m) if m.contains("upstream reset")), "{err:?}");
}

#[tokio::test]
async fn empty_credential_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(sse_response(&[finish_chunk("stop")]))
        .expect(0)
        .mount(&server)
        .await;

    let settings = ProviderSettings::new(server.uri(), "openai/gpt-5-mini", Credential::new(""));
    let config = AgentConfiguration::new(DEFAULT_INSTRUCTIONS, travel_tools().unwrap(), settings);
    assert!(matches!(
        AgentSession::connect(config.clone()),
        Err(WayfarerError::Configuration(_))
    ));

    // Even with a provider wired in directly, the turn refuses to start.
    let provider = OpenAiProvider::new("openai/gpt-5-mini".into(), String::new(), server.uri());
    let session = AgentSession::with_provider(config, Arc::new(provider));
    let err = session
        .run(&Prompt::for_destination(None), RunOptions::new())
        .err()
        .expect("configuration error");
    assert!(matches!(err, WayfarerError::Configuration(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let settings = ProviderSettings::new("http://127.0.0.1:9", "openai/gpt-5-mini", Credential::new("t"));
    let config = AgentConfiguration::new(DEFAULT_INSTRUCTIONS, travel_tools().unwrap(), settings);
    let session = AgentSession::connect(config).unwrap();

    let (fragments, err) = drain(&session, &Prompt::for_destination(None)).await;
    assert!(fragments.is_empty());
    assert!(matches!(err, Some(WayfarerError::Transport(_))), "{err:?}");
}
