//! `wod extract`: re-run extraction on a saved upstream response.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use wod_llm::process_body;

use crate::output;

pub fn handle(file: Option<PathBuf>) -> Result<()> {
    let (source, body) = match file {
        Some(path) => {
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), body)
        }
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("failed to read stdin")?;
            ("stdin".to_string(), body)
        }
    };

    match process_body(&source, &body) {
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
