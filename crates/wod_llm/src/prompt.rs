//! Prompt builder.

use crate::types::GenerationRequest;

/// Render the instruction sent upstream: a one-line brief plus the JSON skeleton the
/// model is asked to fill in.
pub fn build_prompt(req: &GenerationRequest) -> String {
    let mut parts = Vec::new();
    parts.push(format!(
        "Crea una rutina CrossFit de {} min, nivel {}. Objetivo: {}.",
        req.duration_minutes,
        req.level.trim(),
        req.goals.trim()
    ));
    parts.push("Responde SOLO con JSON válido:".to_string());
    parts.push(response_skeleton(req));
    parts.join("\n")
}

fn response_skeleton(req: &GenerationRequest) -> String {
    let level = serde_json::Value::String(req.level.trim().to_string());
    [
        "{".to_string(),
        r#"  "title": "nombre de la rutina","#.to_string(),
        format!(r#"  "duration_minutes": {},"#, req.duration_minutes),
        format!(r#"  "level": {},"#, level),
        r#"  "warmup": ["ejercicio1", "ejercicio2"],"#.to_string(),
        r#"  "exercises": [{"name": "ejercicio", "sets": 3, "reps_or_time": "10 reps", "rest_seconds": 60}],"#.to_string(),
        r#"  "cooldown": ["ejercicio1"],"#.to_string(),
        r#"  "modifications": {"principiante": "texto", "avanzado": "texto"}"#.to_string(),
        "}".to_string(),
    ]
    .join("\n")
}
