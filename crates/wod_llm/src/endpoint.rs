//! Upstream endpoints and their request bodies.

use serde::Serialize;
use wod_constant::defaults::{CHAT_COMPLETIONS_PATH, LOCAL_GENERATE_PATH, RESPONSES_PATH};

use crate::config::BackendConfig;

/// One upstream API shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Hosted Responses API (`input` + `max_output_tokens`)
    Responses,
    /// Hosted Chat Completions API (`messages` + `max_tokens`)
    ChatCompletions,
    /// Local `/api/generate` with strict-JSON formatting
    LocalGenerate,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Responses => "responses",
            Endpoint::ChatCompletions => "chat_completions",
            Endpoint::LocalGenerate => "local_generate",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Responses => RESPONSES_PATH,
            Endpoint::ChatCompletions => CHAT_COMPLETIONS_PATH,
            Endpoint::LocalGenerate => LOCAL_GENERATE_PATH,
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }

    /// Body for one `(model, prompt)` attempt against this endpoint.
    pub fn request_body<'a>(&self, model: &'a str, prompt: &'a str, sampling: &Sampling) -> RequestBody<'a> {
        match self {
            Endpoint::Responses => RequestBody::Responses(ResponsesRequest {
                model,
                input: prompt,
                temperature: sampling.temperature,
                max_output_tokens: sampling.max_output_tokens,
            }),
            Endpoint::ChatCompletions => RequestBody::Chat(ChatRequest {
                model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
                temperature: sampling.temperature,
                max_tokens: sampling.max_output_tokens,
            }),
            Endpoint::LocalGenerate => RequestBody::Local(LocalRequest {
                model,
                prompt,
                stream: false,
                format: "json",
                options: LocalOptions {
                    temperature: sampling.temperature,
                    top_p: sampling.top_p,
                    num_predict: sampling.max_output_tokens,
                    num_ctx: sampling.context_window,
                },
            }),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Generation bounds shared by every attempt of a backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: Option<f32>,
    pub context_window: Option<u32>,
}

impl From<&BackendConfig> for Sampling {
    fn from(backend: &BackendConfig) -> Self {
        match backend {
            BackendConfig::Hosted(c) => Sampling {
                temperature: c.temperature,
                max_output_tokens: c.max_output_tokens,
                top_p: None,
                context_window: None,
            },
            BackendConfig::Local(c) => Sampling {
                temperature: c.temperature,
                max_output_tokens: c.max_output_tokens,
                top_p: Some(c.top_p),
                context_window: Some(c.context_window),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestBody<'a> {
    Responses(ResponsesRequest<'a>),
    Chat(ChatRequest<'a>),
    Local(LocalRequest<'a>),
}

#[derive(Debug, Serialize)]
pub struct ResponsesRequest<'a> {
    pub model: &'a str,
    pub input: &'a str,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LocalRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    /// Asks the server to constrain output to JSON
    pub format: &'a str,
    pub options: LocalOptions,
}

#[derive(Debug, Serialize)]
pub struct LocalOptions {
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    pub num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<u32>,
}
