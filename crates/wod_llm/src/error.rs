//! Error types for the generation pipeline.
//!
//! Every variant carries the diagnostic payload needed to tune prompts and models,
//! and serializes as an object tagged by `"error"` so callers can hand it back as-is.

use serde::Serialize;
use thiserror::Error;

/// Final failure of one cascade stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamFailure {
    /// Endpoint name (`responses`, `chat_completions`, `local_generate`)
    pub endpoint: String,
    pub url: String,
    pub model: String,
    /// HTTP status, absent when the last attempt never got a response
    pub status: Option<u16>,
    pub body: Option<String>,
    /// Transport failure detail, if the last attempt failed below HTTP
    pub detail: Option<String>,
}

impl std::fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, &self.detail) {
            (Some(status), _) => write!(f, "{} [{}] -> {}", self.endpoint, self.model, status),
            (None, Some(detail)) => write!(f, "{} [{}] -> {}", self.endpoint, self.model, detail),
            (None, None) => write!(f, "{} [{}] -> no response", self.endpoint, self.model),
        }
    }
}

/// Errors surfaced by [`crate::GenerationClient::generate`] and [`crate::process_envelope`].
#[derive(Error, Debug, Serialize)]
#[serde(tag = "error")]
pub enum PipelineError {
    /// Transport failure (connection refused, DNS, timeout) with no HTTP answer at all
    #[error("request to {url} failed: {detail}")]
    #[serde(rename = "request_error")]
    Request { url: String, detail: String },

    /// Backend answered, but every stage ended in a failure status
    #[error("upstream failed: {}", join_failures(.failures))]
    #[serde(rename = "upstream_error")]
    Upstream { failures: Vec<UpstreamFailure> },

    /// Backend body is not JSON
    #[error("invalid JSON envelope from {url}")]
    #[serde(rename = "invalid_json")]
    InvalidEnvelopeJson { url: String, body: String },

    /// Text extracted, but no JSON object could be carved out of it
    #[error("no valid JSON object in generated text")]
    #[serde(rename = "no_valid_json")]
    NoValidJson { raw_text: String },
}

impl PipelineError {
    /// Stable tag, matching the serialized `"error"` field.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Request { .. } => "request_error",
            PipelineError::Upstream { .. } => "upstream_error",
            PipelineError::InvalidEnvelopeJson { .. } => "invalid_json",
            PipelineError::NoValidJson { .. } => "no_valid_json",
        }
    }

    /// Full diagnostic payload as JSON.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::to_value(self)
            .unwrap_or_else(|_| serde_json::json!({ "error": self.kind(), "detail": self.to_string() }))
    }
}

fn join_failures(failures: &[UpstreamFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration errors (bad env values).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown backend '{0}' (expected hosted or local)")]
    UnknownBackend(String),

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("model list is empty")]
    NoModels,
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_is_tagged() {
        let err = PipelineError::NoValidJson {
            raw_text: "sorry, no json".to_string(),
        };
        let payload = err.payload();
        assert_eq!(payload["error"], "no_valid_json");
        assert_eq!(payload["raw_text"], "sorry, no json");
        assert_eq!(err.kind(), "no_valid_json");
    }

    #[test]
    fn test_upstream_payload_keeps_every_stage() {
        let err = PipelineError::Upstream {
            failures: vec![
                UpstreamFailure {
                    endpoint: "responses".into(),
                    url: "http://x/responses".into(),
                    model: "gpt-4".into(),
                    status: Some(500),
                    body: Some("boom".into()),
                    detail: None,
                },
                UpstreamFailure {
                    endpoint: "chat_completions".into(),
                    url: "http://x/chat/completions".into(),
                    model: "gpt-3.5-turbo".into(),
                    status: None,
                    body: None,
                    detail: Some("connection refused".into()),
                },
            ],
        };
        let payload = err.payload();
        assert_eq!(payload["error"], "upstream_error");
        assert_eq!(payload["failures"][0]["status"], 500);
        assert_eq!(payload["failures"][1]["detail"], "connection refused");
        assert_eq!(
            err.to_string(),
            "upstream failed: responses [gpt-4] -> 500; chat_completions [gpt-3.5-turbo] -> connection refused"
        );
    }

    #[test]
    fn test_request_error_display() {
        let err = PipelineError::Request {
            url: "http://127.0.0.1:1/api/generate".into(),
            detail: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "request to http://127.0.0.1:1/api/generate failed: connection refused"
        );
        assert_eq!(err.payload()["url"], "http://127.0.0.1:1/api/generate");
    }
}
