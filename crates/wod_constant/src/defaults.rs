//! Defaults for the generation backends and the normalised routine.

/// Hosted provider base URL. Endpoint paths are appended to it.
pub const HOSTED_BASE_URL: &str = "https://api.openai.com/v1";
/// Newer hosted API shape, tried first.
pub const RESPONSES_PATH: &str = "/responses";
/// Older hosted API shape, used as the secondary stage.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Hosted models, in the order they are tried.
pub const PREFERRED_MODELS: &[&str] = &["gpt-4", "gpt-4o", "gpt-3.5-turbo"];

/// Local (Ollama-compatible) server.
pub const LOCAL_BASE_URL: &str = "http://localhost:11434";
pub const LOCAL_GENERATE_PATH: &str = "/api/generate";
pub const LOCAL_MODEL: &str = "llama3.2";

pub const TEMPERATURE: f32 = 0.3;
pub const TOP_P: f32 = 0.9;
pub const MAX_OUTPUT_TOKENS: u32 = 900;
pub const CONTEXT_WINDOW: u32 = 4096;

/// Hosted calls are short; local inference is much slower.
pub const HOSTED_TIMEOUT_SECS: u64 = 60;
pub const LOCAL_TIMEOUT_SECS: u64 = 300;

/// Title used when the model omits one.
pub const ROUTINE_TITLE: &str = "Rutina personalizada";
/// Exercise name used when the model omits one or sends a non-string.
pub const EXERCISE_NAME: &str = "Ejercicio";
