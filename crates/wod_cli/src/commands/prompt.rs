//! `wod prompt`: render the prompt without calling a model.

use anyhow::Result;
use wod_llm::{GenerationRequest, build_prompt};

use crate::cli::RequestArgs;
use crate::output;

pub fn handle(request: RequestArgs) -> Result<()> {
    let request = GenerationRequest::from(request);
    output::plain("prompt", &build_prompt(&request));
    Ok(())
}
