//! Command dispatch.

pub mod config;
pub mod extract;
pub mod generate;
pub mod prompt;

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use tracing::Instrument;
use wod_llm::{GenerationConfig, GenerationRequest};
use wod_observability::{command_span, record_duration, record_error};

use crate::cli::{BackendArgs, Cli, Command, RequestArgs};

pub async fn handle(cli: Cli) -> Result<()> {
    let span = command_span!(cli.command.name());
    let start = Instant::now();

    let result = dispatch(cli.command).instrument(span.clone()).await;

    let _guard = span.enter();
    record_duration("duration_ms", start.elapsed());
    if let Err(e) = &result {
        let cause: &(dyn std::error::Error + 'static) = e.as_ref();
        record_error(cause);
    }
    result
}

async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Generate { request, backend } => generate::handle(request, backend).await,
        Command::Prompt { request } => prompt::handle(request),
        Command::Extract { file } => extract::handle(file),
        Command::Config { backend } => config::handle(backend),
    }
}

impl From<RequestArgs> for GenerationRequest {
    fn from(args: RequestArgs) -> Self {
        GenerationRequest::new(args.level, args.duration, args.goals)
    }
}

/// Environment configuration with the command-line flags layered on top.
pub fn resolve_config(args: &BackendArgs) -> Result<GenerationConfig> {
    let overrides = overrides(args);
    let config = GenerationConfig::from_lookup(|key| {
        overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    })?;
    Ok(config)
}

/// Flags expressed as the env keys they override.
fn overrides(args: &BackendArgs) -> HashMap<&'static str, String> {
    let mut map = HashMap::new();
    if let Some(backend) = &args.backend {
        map.insert("WOD_BACKEND", backend.clone());
    }
    if !args.models.is_empty() {
        map.insert("WOD_MODELS", args.models.join(","));
        map.insert("OLLAMA_MODEL", args.models[0].clone());
    }
    if let Some(url) = &args.base_url {
        map.insert("OPENAI_BASE_URL", url.clone());
        map.insert("OLLAMA_BASE_URL", url.clone());
    }
    if let Some(secs) = args.timeout {
        map.insert("WOD_TIMEOUT_SECS", secs.to_string());
    }
    map
}

/// Hosted API key from the environment; empty when unset.
pub fn credential() -> String {
    std::env::var("OPENAI_API_KEY").unwrap_or_default()
}
