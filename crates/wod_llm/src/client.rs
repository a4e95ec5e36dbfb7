//! Generation client: trait + HTTP implementation driving the cascade.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::cascade::{Attempt, AttemptOutcome, Cascade, Transport};
use crate::config::{BackendConfig, GenerationConfig};
use crate::endpoint::{Endpoint, Sampling};
use crate::error::{ConfigError, Result};
use crate::pipeline::process_body;
use crate::types::CanonicalRoutine;

/// Anything that can turn a prompt into a routine.
#[async_trait]
pub trait RoutineGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<CanonicalRoutine>;
}

/// HTTP client over the configured backend.
pub struct GenerationClient {
    config: GenerationConfig,
    cascade: Cascade,
    http: reqwest::Client,
}

impl GenerationClient {
    /// Fails with [`ConfigError::NoModels`] when the backend has no model to try.
    pub fn new(config: GenerationConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots).
    pub fn with_http_client(
        config: GenerationConfig,
        http: reqwest::Client,
    ) -> std::result::Result<Self, ConfigError> {
        config.backend.validate()?;
        let cascade = Cascade::for_backend(&config.backend);
        Ok(Self {
            config,
            cascade,
            http,
        })
    }

    /// Replace the cascade, e.g. to change the stop rule.
    pub fn with_cascade(mut self, cascade: Cascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    async fn run(&self, prompt: &str, credential: &str) -> Result<CanonicalRoutine> {
        let transport = HttpTransport {
            http: &self.http,
            backend: &self.config.backend,
            sampling: Sampling::from(&self.config.backend),
            prompt,
            credential,
        };

        let start = Instant::now();
        let reply = self.cascade.run(&transport).await?;
        info!(
            endpoint = reply.endpoint.name(),
            model = %reply.model,
            status = reply.status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "upstream answered"
        );

        process_body(&reply.url, &reply.body)
    }
}

#[async_trait]
impl RoutineGenerator for GenerationClient {
    async fn generate(&self, prompt: &str, credential: &str) -> Result<CanonicalRoutine> {
        let span = info_span!(
            "wod.generate",
            generation.id = %Uuid::new_v4(),
            backend = self.config.backend.kind().as_str(),
        );
        self.run(prompt, credential).instrument(span).await
    }
}

/// One POST per attempt, bounded by the backend timeout.
struct HttpTransport<'a> {
    http: &'a reqwest::Client,
    backend: &'a BackendConfig,
    sampling: Sampling,
    prompt: &'a str,
    credential: &'a str,
}

impl<'a> HttpTransport<'a> {
    fn base_url(&self) -> &str {
        match self.backend {
            BackendConfig::Hosted(c) => &c.base_url,
            BackendConfig::Local(c) => &c.base_url,
        }
    }
}

#[async_trait]
impl<'a> Transport for HttpTransport<'a> {
    async fn send(&self, endpoint: Endpoint, model: &str) -> Attempt {
        let url = endpoint.url(self.base_url());
        let timeout = self.backend.timeout();
        let body = endpoint.request_body(model, self.prompt, &self.sampling);

        let mut request = self.http.post(&url).timeout(timeout).json(&body);
        if !self.credential.is_empty() {
            request = request.bearer_auth(self.credential);
        }

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(body) if status.is_success() => AttemptOutcome::Success {
                        status: status.as_u16(),
                        body,
                    },
                    Ok(body) => AttemptOutcome::Status {
                        status: status.as_u16(),
                        body,
                    },
                    Err(e) => AttemptOutcome::Transport {
                        detail: describe(&e, timeout),
                    },
                }
            }
            Err(e) => AttemptOutcome::Transport {
                detail: describe(&e, timeout),
            },
        };

        Attempt { url, outcome }
    }
}

/// Error message with its source chain (reqwest hides "connection refused" there).
fn describe(error: &reqwest::Error, timeout: Duration) -> String {
    if error.is_timeout() {
        return format!("timed out after {}s", timeout.as_secs_f32());
    }
    let mut detail = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    detail
}
