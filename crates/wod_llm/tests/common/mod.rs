//! Shared helpers for the HTTP integration tests.

use std::time::Duration;

use tokio::net::TcpListener;
use wod_llm::{GenerationClient, GenerationConfig, HostedConfig, LocalConfig};

/// A routine the upstream "model" writes, wrapped in some chatter.
pub const ROUTINE_TEXT: &str = r#"Claro: {"title":"Fuerza total","duration_minutes":45,"level":"intermedio","warmup":["Movilidad 5 min"],"exercises":[{"name":"Sentadilla","sets":4,"reps_or_time":"8","rest_seconds":90}],"cooldown":["Estiramientos"],"modifications":{"principiante":"Menos peso"}}"#;

/// Hosted client pointed at a mock server, short timeout.
#[allow(dead_code)]
pub fn hosted_client(base_url: &str, models: &[&str]) -> GenerationClient {
    let config = HostedConfig::default()
        .with_base_url(base_url)
        .with_models(models.iter().copied())
        .with_timeout(Duration::from_secs(5));
    GenerationClient::new(GenerationConfig::hosted(config)).unwrap()
}

/// Local client pointed at a mock server.
#[allow(dead_code)]
pub fn local_client(base_url: &str, timeout: Duration) -> GenerationClient {
    let config = LocalConfig::default()
        .with_base_url(base_url)
        .with_timeout(timeout);
    GenerationClient::new(GenerationConfig::local(config)).unwrap()
}

/// Responses-API envelope around `text`.
#[allow(dead_code)]
pub fn responses_envelope(text: &str) -> String {
    serde_json::json!({
        "id": "resp_1",
        "output": [{ "type": "message", "content": [{ "type": "output_text", "text": text }] }]
    })
    .to_string()
}

/// Chat-completions envelope around `text`.
#[allow(dead_code)]
pub fn chat_envelope(text: &str) -> String {
    serde_json::json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": text } }]
    })
    .to_string()
}

/// Body of a "model does not exist" 404.
#[allow(dead_code)]
pub fn model_not_found(model: &str) -> String {
    serde_json::json!({
        "error": {
            "message": format!("The model `{model}` does not exist or you do not have access to it."),
            "code": "model_not_found"
        }
    })
    .to_string()
}

/// Base URL of a port nothing listens on.
#[allow(dead_code)]
pub async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Base URL of a server that accepts connections and never answers.
#[allow(dead_code)]
pub async fn silent_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
