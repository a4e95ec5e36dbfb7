//! wod-llm: turns a workout prompt into a strict routine, whatever the model sends back.
//!
//! ## Pipeline
//!
//! ```text
//! GenerationClient ──(cascade of endpoint × model)──▶ upstream
//!        │
//!        ▼
//!   raw body ──decode──▶ envelope ──extract_text──▶ text ──carve_json──▶ object
//!                                                                          │
//!                                                     CanonicalRoutine ◀──normalize
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wod_llm::{build_prompt, GenerationClient, GenerationConfig, GenerationRequest, RoutineGenerator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GenerationClient::new(GenerationConfig::from_env()?)?;
//! let prompt = build_prompt(&GenerationRequest::new("intermedio", 45, "fuerza"));
//! let routine = client.generate(&prompt, "").await?;
//! println!("{}", routine.title);
//! # Ok(())
//! # }
//! ```

pub mod carve;
pub mod cascade;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod types;

pub use carve::carve_json;
pub use cascade::{Attempt, AttemptOutcome, Cascade, Reply, Stage, Transport, advance_on_missing_model};
pub use client::{GenerationClient, RoutineGenerator};
pub use config::{BackendConfig, BackendKind, GenerationConfig, HostedConfig, LocalConfig};
pub use endpoint::{Endpoint, Sampling};
pub use envelope::{Envelope, extract_text};
pub use error::{ConfigError, PipelineError, Result, UpstreamFailure};
pub use normalize::normalize;
pub use pipeline::{process_body, process_envelope};
pub use prompt::build_prompt;
pub use types::{CanonicalRoutine, ExerciseItem, GenerationRequest};
