//! HTTP-level tests for the generation client against mock upstreams.

mod common;

use std::time::Duration;

use common::*;
use mockito::{Matcher, Server};
use serde_json::json;
use wod_llm::{GenerationRequest, PipelineError, RoutineGenerator, build_prompt};

#[tokio::test]
async fn test_missing_model_falls_through_to_next_model() {
    let mut server = Server::new_async().await;

    let first = server
        .mock("POST", "/responses")
        .match_body(Matcher::PartialJson(json!({ "model": "gpt-a" })))
        .with_status(404)
        .with_body(model_not_found("gpt-a"))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/responses")
        .match_body(Matcher::PartialJson(json!({ "model": "gpt-b" })))
        .with_status(200)
        .with_body(responses_envelope(ROUTINE_TEXT))
        .expect(1)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let client = hosted_client(&server.url(), &["gpt-a", "gpt-b", "gpt-c"]);
    let routine = client.generate("prompt", "sk-test").await.unwrap();

    assert_eq!(routine.title, "Fuerza total");
    assert_eq!(routine.duration_minutes, Some(45));
    assert_eq!(routine.exercises[0].name, "Sentadilla");
    assert_eq!(routine.exercises[0].rest_seconds, Some(90));
    assert_eq!(routine.raw_text, ROUTINE_TEXT);

    first.assert_async().await;
    second.assert_async().await;
    chat.assert_async().await;
}

#[tokio::test]
async fn test_rendered_prompt_to_routine_over_chat_completions() {
    let mut server = Server::new_async().await;
    let prompt = build_prompt(&GenerationRequest::new("intermediate", 30, "strength"));
    let text = r#"Here you go: {"title":"Strength Blast","exercises":[{"name":"Deadlift","sets":5,"reps_or_time":"5"}]}"#;

    let primary = server
        .mock("POST", "/responses")
        .with_status(404)
        .with_body(model_not_found("gpt-a"))
        .expect(1)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-a",
            "messages": [{ "role": "user", "content": prompt }]
        })))
        .with_status(200)
        .with_body(chat_envelope(text))
        .expect(1)
        .create_async()
        .await;

    let client = hosted_client(&server.url(), &["gpt-a"]);
    let routine = client.generate(&prompt, "sk-test").await.unwrap();

    assert_eq!(routine.title, "Strength Blast");
    assert_eq!(routine.exercises.len(), 1);
    assert_eq!(routine.exercises[0].name, "Deadlift");
    assert_eq!(routine.exercises[0].sets, 5);
    assert_eq!(routine.exercises[0].reps_or_time, "5");
    assert_eq!(routine.exercises[0].rest_seconds, None);
    assert_eq!(routine.duration_minutes, None);
    assert_eq!(routine.level, None);
    assert!(routine.warmup.is_empty());
    assert!(routine.cooldown.is_empty());
    assert!(routine.modifications.is_empty());
    assert_eq!(routine.raw_text, text);

    primary.assert_async().await;
    chat.assert_async().await;
}

#[tokio::test]
async fn test_primary_failure_falls_back_to_chat_completions() {
    let mut server = Server::new_async().await;

    let primary = server
        .mock("POST", "/responses")
        .with_status(400)
        .with_body(r#"{"error":{"message":"Unsupported parameter"}}"#)
        .expect(1)
        .create_async()
        .await;
    let chat = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-a",
            "messages": [{ "role": "user", "content": "prompt" }],
            "max_tokens": 900
        })))
        .with_status(200)
        .with_body(chat_envelope(ROUTINE_TEXT))
        .expect(1)
        .create_async()
        .await;

    let client = hosted_client(&server.url(), &["gpt-a", "gpt-b"]);
    let routine = client.generate("prompt", "sk-test").await.unwrap();
    assert_eq!(routine.cooldown, vec!["Estiramientos"]);
    assert_eq!(routine.modifications["principiante"], "Menos peso");

    primary.assert_async().await;
    chat.assert_async().await;
}

#[tokio::test]
async fn test_both_endpoints_failing_reports_each() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/responses")
        .with_status(500)
        .with_body("primary exploded")
        .create_async()
        .await;
    server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("secondary overloaded")
        .create_async()
        .await;

    let client = hosted_client(&server.url(), &["gpt-a"]);
    let err = client.generate("prompt", "sk-test").await.unwrap_err();
    assert_eq!(err.kind(), "upstream_error");

    let PipelineError::Upstream { failures } = err else {
        panic!("expected upstream error");
    };
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].status, Some(500));
    assert_eq!(failures[0].body.as_deref(), Some("primary exploded"));
    assert!(failures[0].url.ends_with("/responses"));
    assert_eq!(failures[1].status, Some(503));
    assert_eq!(failures[1].body.as_deref(), Some("secondary overloaded"));
    assert!(failures[1].url.ends_with("/chat/completions"));
}

#[tokio::test]
async fn test_credential_sent_as_bearer() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/responses")
        .match_header("authorization", "Bearer sk-secret")
        .match_body(Matcher::PartialJson(json!({
            "input": "prompt",
            "max_output_tokens": 900
        })))
        .with_status(200)
        .with_body(responses_envelope(ROUTINE_TEXT))
        .expect(1)
        .create_async()
        .await;

    let client = hosted_client(&server.url(), &["gpt-a"]);
    client.generate("prompt", "sk-secret").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_local_backend_requests_strict_json() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama3.2",
            "prompt": "prompt",
            "stream": false,
            "format": "json",
            "options": { "num_predict": 900, "num_ctx": 4096 }
        })))
        .with_status(200)
        .with_body(json!({ "model": "llama3.2", "response": ROUTINE_TEXT, "done": true }).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = local_client(&server.url(), Duration::from_secs(5));
    let routine = client.generate("prompt", "").await.unwrap();
    assert_eq!(routine.level.as_deref(), Some("intermedio"));
    assert_eq!(routine.warmup, vec!["Movilidad 5 min"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_success_body_that_is_not_json() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = local_client(&server.url(), Duration::from_secs(5));
    match client.generate("prompt", "").await {
        Err(PipelineError::InvalidEnvelopeJson { url, body }) => {
            assert!(url.ends_with("/api/generate"));
            assert_eq!(body, "<html>gateway</html>");
        }
        other => panic!("expected invalid_json, got {other:?}"),
    }
}

#[tokio::test]
async fn test_model_answer_without_json() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_body(json!({ "response": "No puedo ayudar con eso." }).to_string())
        .create_async()
        .await;

    let client = local_client(&server.url(), Duration::from_secs(5));
    let err = client.generate("prompt", "").await.unwrap_err();
    assert_eq!(err.kind(), "no_valid_json");
    assert_eq!(err.payload()["raw_text"], "No puedo ayudar con eso.");
}

#[tokio::test]
async fn test_unreachable_upstream_is_request_error() {
    let base_url = refused_base_url().await;
    let client = hosted_client(&base_url, &["gpt-a", "gpt-b"]);

    match client.generate("prompt", "sk-test").await {
        Err(PipelineError::Request { url, detail }) => {
            assert_eq!(url, format!("{base_url}/chat/completions"));
            assert!(!detail.is_empty());
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_silent_upstream_times_out() {
    let base_url = silent_base_url().await;
    let client = local_client(&base_url, Duration::from_millis(200));

    match client.generate("prompt", "").await {
        Err(PipelineError::Request { url, detail }) => {
            assert_eq!(url, format!("{base_url}/api/generate"));
            assert!(detail.contains("timed out"), "detail: {detail}");
        }
        other => panic!("expected request error, got {other:?}"),
    }
}
