//! `wod generate`: one routine from the configured backend.

use anyhow::{Result, anyhow};
use wod_llm::{BackendKind, GenerationClient, GenerationRequest, RoutineGenerator, build_prompt};

use crate::cli::{BackendArgs, RequestArgs};
use crate::commands::{credential, resolve_config};
use crate::output;

pub async fn handle(request: RequestArgs, backend: BackendArgs) -> Result<()> {
    let config = resolve_config(&backend)?;
    let credential = match config.backend.kind() {
        BackendKind::Hosted => credential(),
        BackendKind::Local => String::new(),
    };
    if config.backend.kind() == BackendKind::Hosted && credential.is_empty() {
        output::warning("OPENAI_API_KEY is not set; calling the hosted API without a key");
    }

    let request = GenerationRequest::from(request);
    let prompt = build_prompt(&request);
    tracing::debug!(fitness_level = %request.level, duration = request.duration_minutes, "prompt rendered");

    let client = GenerationClient::new(config)?;
    let spinner = output::spinner(&format!(
        "Generando rutina ({} min, {})...",
        request.duration_minutes, request.level
    ));
    let result = client.generate(&prompt, &credential).await;
    spinner.finish_and_clear();

    match result {
        Ok(routine) => {
            output::routine(&routine);
            Ok(())
        }
        Err(e) => {
            output::diagnostic(&e.payload());
            Err(anyhow!(e))
        }
    }
}
