//! Extractor → carver → normaliser, over a body that has already been fetched.

use serde_json::Value;

use crate::carve::carve_json;
use crate::envelope::extract_text;
use crate::error::{PipelineError, Result};
use crate::normalize::normalize;
use crate::types::CanonicalRoutine;

/// Turn a decoded envelope into a routine.
///
/// Fails only with [`PipelineError::NoValidJson`], which keeps the extracted text.
pub fn process_envelope(envelope: &Value) -> Result<CanonicalRoutine> {
    let text = extract_text(envelope);
    match carve_json(&text) {
        Some(parsed) => Ok(normalize(&parsed, &text)),
        None => Err(PipelineError::NoValidJson { raw_text: text }),
    }
}

/// Decode a raw body from `source` (a URL or file path) and process it.
pub fn process_body(source: &str, body: &str) -> Result<CanonicalRoutine> {
    let envelope: Value =
        serde_json::from_str(body).map_err(|_| PipelineError::InvalidEnvelopeJson {
            url: source.to_string(),
            body: body.to_string(),
        })?;
    process_envelope(&envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_envelope_end_to_end() {
        let text = r#"Here you go: {"title":"Strength Blast","exercises":[{"name":"Deadlift","sets":5,"reps_or_time":"5"}]}"#;
        let envelope = json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] });
        let routine = process_envelope(&envelope).unwrap();
        assert_eq!(routine.title, "Strength Blast");
        assert_eq!(routine.exercises.len(), 1);
        assert_eq!(routine.exercises[0].name, "Deadlift");
        assert_eq!(routine.exercises[0].sets, 5);
        assert_eq!(routine.exercises[0].reps_or_time, "5");
        assert!(routine.warmup.is_empty());
        assert!(routine.cooldown.is_empty());
        assert!(routine.modifications.is_empty());
        assert_eq!(routine.raw_text, text);
    }

    #[test]
    fn test_no_json_keeps_text() {
        let envelope = json!({ "response": "I cannot help with that." });
        match process_envelope(&envelope) {
            Err(PipelineError::NoValidJson { raw_text }) => {
                assert_eq!(raw_text, "I cannot help with that.")
            }
            other => panic!("expected no_valid_json, got {other:?}"),
        }
    }

    #[test]
    fn test_body_that_is_not_json() {
        match process_body("saved.json", "<html>502 Bad Gateway</html>") {
            Err(PipelineError::InvalidEnvelopeJson { url, body }) => {
                assert_eq!(url, "saved.json");
                assert_eq!(body, "<html>502 Bad Gateway</html>");
            }
            other => panic!("expected invalid_json, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_envelope_is_dumped_then_carved() {
        let envelope = json!({ "title": "Dumped", "warmup": ["jog"] });
        let routine = process_body("x", &envelope.to_string()).unwrap();
        assert_eq!(routine.title, "Dumped");
        assert_eq!(routine.warmup, vec!["jog"]);
    }
}
