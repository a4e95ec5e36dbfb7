//! wod observability - logging setup shared by the wod binaries.
//!
//! Every log line goes to stderr so stdout stays clean for routines and JSON output.
//!
//! # Quick Start
//!
//! ```no_run
//! use wod_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::new("wod-cli").with_log_level("debug");
//! init(config)?;
//!
//! tracing::info!("ready");
//! # Ok::<(), wod_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `WOD_LOG` or `RUST_LOG` - log level filter (default `warn`)
//! - `WOD_LOG_FORMAT` - `compact` (default) or `full`

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env};
pub use tracing::{record_duration, record_error};
