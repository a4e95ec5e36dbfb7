//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wod_constant::app;

#[derive(Parser)]
#[command(name = app::NAME, about = app::DESCRIPTION, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

/// What the routine should look like.
#[derive(Args, Clone, Debug)]
pub struct RequestArgs {
    /// Fitness level (e.g. principiante, intermedio, avanzado)
    #[arg(short, long)]
    pub level: String,
    /// Session length in minutes
    #[arg(short, long, default_value_t = 45, value_parser = clap::value_parser!(u32).range(10..=120))]
    pub duration: u32,
    /// Training goals, free text
    #[arg(short, long)]
    pub goals: String,
}

/// Overrides on top of the environment configuration.
#[derive(Args, Clone, Debug, Default)]
pub struct BackendArgs {
    /// Backend: hosted (openai) or local (ollama). Uses WOD_BACKEND if not set.
    #[arg(long)]
    pub backend: Option<String>,
    /// Model to try; repeat to set the fallback order. Uses WOD_MODELS / OLLAMA_MODEL if not set.
    #[arg(short, long = "model")]
    pub models: Vec<String>,
    /// Base URL of the selected backend
    #[arg(long)]
    pub base_url: Option<String>,
    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a routine
    Generate {
        #[command(flatten)]
        request: RequestArgs,
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Print the prompt that would be sent, without calling any model
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Re-process a saved upstream response (file or stdin)
    Extract {
        /// Path to the saved JSON response; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Show the resolved configuration
    Config {
        #[command(flatten)]
        backend: BackendArgs,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Generate { .. } => "generate",
            Command::Prompt { .. } => "prompt",
            Command::Extract { .. } => "extract",
            Command::Config { .. } => "config",
        }
    }
}
