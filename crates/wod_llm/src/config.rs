//! Generation configuration.
//!
//! Passed to [`crate::GenerationClient`] at construction; nothing in the pipeline reads the
//! process environment on its own.

use std::str::FromStr;
use std::time::Duration;

use wod_constant::defaults;

use crate::error::ConfigError;

/// Which backend family answers the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Hosted provider with the two-endpoint, multi-model cascade
    Hosted,
    /// Self-hosted model, one endpoint, one model
    #[default]
    Local,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Hosted => "hosted",
            BackendKind::Local => "local",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hosted" | "openai" => Ok(BackendKind::Hosted),
            "local" | "ollama" => Ok(BackendKind::Local),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hosted provider settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedConfig {
    /// Base URL (default: https://api.openai.com/v1)
    pub base_url: String,
    /// Candidate models, tried in order
    pub models: Vec<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Per-call timeout
    pub timeout: Duration,
}

impl Default for HostedConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::HOSTED_BASE_URL.to_string(),
            models: defaults::PREFERRED_MODELS.iter().map(|m| m.to_string()).collect(),
            temperature: defaults::TEMPERATURE,
            max_output_tokens: defaults::MAX_OUTPUT_TOKENS,
            timeout: Duration::from_secs(defaults::HOSTED_TIMEOUT_SECS),
        }
    }
}

impl HostedConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

/// Local (Ollama-compatible) model settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalConfig {
    /// Base URL (default: http://localhost:11434)
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    /// Generation cap (`num_predict`)
    pub max_output_tokens: u32,
    /// Context window (`num_ctx`)
    pub context_window: u32,
    /// Per-call timeout
    pub timeout: Duration,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LOCAL_BASE_URL.to_string(),
            model: defaults::LOCAL_MODEL.to_string(),
            temperature: defaults::TEMPERATURE,
            top_p: defaults::TOP_P,
            max_output_tokens: defaults::MAX_OUTPUT_TOKENS,
            context_window: defaults::CONTEXT_WINDOW,
            timeout: Duration::from_secs(defaults::LOCAL_TIMEOUT_SECS),
        }
    }
}

impl LocalConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_base_url(base_url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }

    pub fn with_context_window(mut self, tokens: u32) -> Self {
        self.context_window = tokens;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    Hosted(HostedConfig),
    Local(LocalConfig),
}

impl BackendConfig {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendConfig::Hosted(_) => BackendKind::Hosted,
            BackendConfig::Local(_) => BackendKind::Local,
        }
    }

    pub fn timeout(&self) -> Duration {
        match self {
            BackendConfig::Hosted(c) => c.timeout,
            BackendConfig::Local(c) => c.timeout,
        }
    }

    /// At least one non-blank model to try.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let has_model = match self {
            BackendConfig::Hosted(c) => c.models.iter().any(|m| !m.trim().is_empty()),
            BackendConfig::Local(c) => !c.model.trim().is_empty(),
        };
        if has_model { Ok(()) } else { Err(ConfigError::NoModels) }
    }
}

/// Top-level configuration value.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub backend: BackendConfig,
}

impl GenerationConfig {
    pub fn hosted(config: HostedConfig) -> Self {
        Self {
            backend: BackendConfig::Hosted(config),
        }
    }

    pub fn local(config: LocalConfig) -> Self {
        Self {
            backend: BackendConfig::Local(config),
        }
    }

    /// Defaults for the given backend kind.
    pub fn for_kind(kind: BackendKind) -> Self {
        match kind {
            BackendKind::Hosted => Self::hosted(HostedConfig::default()),
            BackendKind::Local => Self::local(LocalConfig::default()),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `WOD_BACKEND` selects the backend; when unset, a present `OPENAI_API_KEY` selects
    /// the hosted provider, otherwise the local model.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = match get("WOD_BACKEND") {
            Some(value) => value.parse::<BackendKind>()?,
            None if get("OPENAI_API_KEY").is_some() => BackendKind::Hosted,
            None => BackendKind::Local,
        };

        let timeout = get("WOD_TIMEOUT_SECS")
            .map(|v| parse_number::<u64>("WOD_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);
        let max_tokens = get("WOD_MAX_TOKENS")
            .map(|v| parse_number::<u32>("WOD_MAX_TOKENS", &v))
            .transpose()?;

        let backend = match kind {
            BackendKind::Hosted => {
                let mut config = HostedConfig::default();
                if let Some(url) = get("OPENAI_BASE_URL") {
                    config = config.with_base_url(url);
                }
                if let Some(list) = get("WOD_MODELS") {
                    config.models = parse_model_list(&list)?;
                }
                if let Some(timeout) = timeout {
                    config.timeout = timeout;
                }
                if let Some(max) = max_tokens {
                    config.max_output_tokens = max;
                }
                BackendConfig::Hosted(config)
            }
            BackendKind::Local => {
                let mut config = LocalConfig::default();
                if let Some(url) = get("OLLAMA_BASE_URL") {
                    config = config.with_base_url(url);
                }
                if let Some(model) = get("OLLAMA_MODEL") {
                    config.model = model.trim().to_string();
                }
                if let Some(timeout) = timeout {
                    config.timeout = timeout;
                }
                if let Some(max) = max_tokens {
                    config.max_output_tokens = max;
                }
                BackendConfig::Local(config)
            }
        };

        Ok(Self { backend })
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_kind(BackendKind::default())
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Comma-separated model list, blanks dropped.
pub fn parse_model_list(list: &str) -> Result<Vec<String>, ConfigError> {
    let models: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();
    if models.is_empty() {
        return Err(ConfigError::NoModels);
    }
    Ok(models)
}
