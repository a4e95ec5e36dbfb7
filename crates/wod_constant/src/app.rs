//! Application metadata constants

pub const NAME: &str = "wod";
pub const DISPLAY_NAME: &str = "wod workout generator";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Generate structured CrossFit routines from a language model";

/// Service name reported in traces.
pub const SERVICE_NAME: &str = "wod-cli";

/// Per-project env file, loaded before the process environment is read.
pub const ENV_FILE: &str = ".env";
