//! Fallback cascade over `(endpoint, model)` candidates.
//!
//! Stages run in order; within a stage, models are tried in order. A stage stops at the
//! first outcome the `advance` predicate rejects. The first success ends the cascade, so
//! later stages only run when every earlier stage failed. At most one call is in flight.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::endpoint::Endpoint;
use crate::error::{PipelineError, Result, UpstreamFailure};

/// Result of one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 2xx with its body
    Success { status: u16, body: String },
    /// Any other HTTP status
    Status { status: u16, body: String },
    /// No HTTP answer: connect error, DNS, timeout, body read failure
    Transport { detail: String },
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AttemptOutcome::Transport { .. })
    }

    /// 404 whose body says the model does not exist or is not accessible.
    pub fn is_model_missing(&self) -> bool {
        match self {
            AttemptOutcome::Status { status: 404, body } => {
                let lower = body.to_lowercase();
                lower.contains("model_not_found")
                    || (lower.contains("model") && lower.contains("not found"))
            }
            _ => false,
        }
    }
}

/// One call, with the URL it went to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub url: String,
    pub outcome: AttemptOutcome,
}

/// Issues one upstream call. The HTTP implementation lives in the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, endpoint: Endpoint, model: &str) -> Attempt;
}

/// Default stop rule: move on when the model is missing or the call never got an answer.
pub fn advance_on_missing_model(outcome: &AttemptOutcome) -> bool {
    outcome.is_model_missing() || outcome.is_transport()
}

/// Candidates sharing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub endpoint: Endpoint,
    pub models: Vec<String>,
}

/// The winning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub endpoint: Endpoint,
    pub model: String,
    pub url: String,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct Cascade {
    pub stages: Vec<Stage>,
    pub advance: fn(&AttemptOutcome) -> bool,
}

impl Cascade {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            advance: advance_on_missing_model,
        }
    }

    /// Hosted: Responses then Chat Completions over the same model list.
    /// Local: one call to the configured model.
    pub fn for_backend(backend: &BackendConfig) -> Self {
        match backend {
            BackendConfig::Hosted(c) => Self::new(vec![
                Stage {
                    endpoint: Endpoint::Responses,
                    models: c.models.clone(),
                },
                Stage {
                    endpoint: Endpoint::ChatCompletions,
                    models: c.models.clone(),
                },
            ]),
            BackendConfig::Local(c) => Self::new(vec![Stage {
                endpoint: Endpoint::LocalGenerate,
                models: vec![c.model.clone()],
            }]),
        }
    }

    pub fn with_advance(mut self, advance: fn(&AttemptOutcome) -> bool) -> Self {
        self.advance = advance;
        self
    }

    /// Every candidate in attempt order.
    pub fn candidates(&self) -> impl Iterator<Item = (Endpoint, &str)> + '_ {
        self.stages.iter().flat_map(|stage| {
            stage
                .models
                .iter()
                .map(move |model| (stage.endpoint, model.as_str()))
        })
    }

    /// Walk the candidates until one succeeds.
    pub async fn run(&self, transport: &dyn Transport) -> Result<Reply> {
        let mut failures = Vec::new();
        let mut answered = false;
        let mut last_transport: Option<(String, String)> = None;

        for stage in &self.stages {
            let mut last: Option<(&str, Attempt)> = None;

            for model in &stage.models {
                debug!(endpoint = stage.endpoint.name(), model = %model, "upstream attempt");
                let attempt = transport.send(stage.endpoint, model).await;

                match &attempt.outcome {
                    AttemptOutcome::Success { status, body } => {
                        return Ok(Reply {
                            endpoint: stage.endpoint,
                            model: model.clone(),
                            url: attempt.url.clone(),
                            status: *status,
                            body: body.clone(),
                        });
                    }
                    AttemptOutcome::Status { status, .. } => {
                        answered = true;
                        warn!(
                            endpoint = stage.endpoint.name(),
                            model = %model,
                            status = *status,
                            model_missing = attempt.outcome.is_model_missing(),
                            "upstream returned failure status"
                        );
                    }
                    AttemptOutcome::Transport { detail } => {
                        warn!(endpoint = stage.endpoint.name(), model = %model, url = %attempt.url, detail = %detail, "upstream unreachable");
                        last_transport = Some((attempt.url.clone(), detail.clone()));
                    }
                }

                let advance = (self.advance)(&attempt.outcome);
                last = Some((model.as_str(), attempt));
                if !advance {
                    break;
                }
            }

            if let Some((model, attempt)) = last {
                failures.push(to_failure(stage.endpoint, model, attempt));
            }
        }

        if answered {
            return Err(PipelineError::Upstream { failures });
        }
        let (url, detail) =
            last_transport.unwrap_or_else(|| (String::new(), "no upstream candidates configured".to_string()));
        Err(PipelineError::Request { url, detail })
    }
}

fn to_failure(endpoint: Endpoint, model: &str, attempt: Attempt) -> UpstreamFailure {
    let (status, body, detail) = match attempt.outcome {
        AttemptOutcome::Success { status, body } | AttemptOutcome::Status { status, body } => {
            (Some(status), Some(body), None)
        }
        AttemptOutcome::Transport { detail } => (None, None, Some(detail)),
    };
    UpstreamFailure {
        endpoint: endpoint.name().to_string(),
        url: attempt.url,
        model: model.to_string(),
        status,
        body,
        detail,
    }
}
