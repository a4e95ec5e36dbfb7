//! `wod config`: show what `generate` would use.

use anyhow::Result;
use serde_json::json;
use wod_constant::app;
use wod_llm::{BackendConfig, Cascade};

use crate::cli::BackendArgs;
use crate::commands::{credential, resolve_config};
use crate::output;

pub fn handle(backend: BackendArgs) -> Result<()> {
    let config = resolve_config(&backend)?;
    let cascade = Cascade::for_backend(&config.backend);
    let has_credential = !credential().is_empty();

    let (base_url, temperature, max_tokens) = match &config.backend {
        BackendConfig::Hosted(c) => (&c.base_url, c.temperature, c.max_output_tokens),
        BackendConfig::Local(c) => (&c.base_url, c.temperature, c.max_output_tokens),
    };
    let timeout_secs = config.backend.timeout().as_secs();

    if output::is_json() {
        let candidates: Vec<_> = cascade
            .candidates()
            .map(|(endpoint, model)| {
                json!({ "endpoint": endpoint.name(), "url": endpoint.url(base_url), "model": model })
            })
            .collect();
        output::data(
            "config",
            &json!({
                "backend": config.backend.kind().as_str(),
                "base_url": base_url,
                "temperature": temperature,
                "max_output_tokens": max_tokens,
                "timeout_secs": timeout_secs,
                "credential_present": has_credential,
                "candidates": candidates,
            }),
        );
        return Ok(());
    }

    output::header(&format!("{} v{}", app::DISPLAY_NAME, app::VERSION));
    output::kv("backend", config.backend.kind().as_str());
    output::kv("base url", base_url);
    output::kv("temperature", &temperature.to_string());
    output::kv("max tokens", &max_tokens.to_string());
    output::kv("timeout", &format!("{timeout_secs}s"));
    if let BackendConfig::Local(c) = &config.backend {
        output::kv("top_p", &c.top_p.to_string());
        output::kv("context", &c.context_window.to_string());
    }
    output::kv(
        "credential",
        if has_credential { "set (OPENAI_API_KEY)" } else { "not set" },
    );

    output::section("Attempt order");
    let mut table = output::table(&["#", "Endpoint", "Model", "URL"]);
    for (i, (endpoint, model)) in cascade.candidates().enumerate() {
        output::table_row(
            &mut table,
            &[
                (i + 1).to_string(),
                endpoint.name().to_string(),
                model.to_string(),
                endpoint.url(base_url),
            ],
        );
    }
    println!("{table}");
    Ok(())
}
