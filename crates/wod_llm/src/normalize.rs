//! Field normaliser: coerce a loosely-typed model object into a [`CanonicalRoutine`].
//!
//! Pure and total. Anything unexpected degrades to a default rather than an error.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use wod_constant::defaults::{EXERCISE_NAME, ROUTINE_TITLE};

use crate::envelope::value_string;
use crate::types::{CanonicalRoutine, ExerciseItem};

/// Build the canonical routine from a carved object and the text it came from.
pub fn normalize(parsed: &Map<String, Value>, raw_text: &str) -> CanonicalRoutine {
    CanonicalRoutine {
        title: pick(parsed, &["title"])
            .map(value_string)
            .unwrap_or_else(|| ROUTINE_TITLE.to_string()),
        duration_minutes: pick(parsed, &["duration_minutes", "durationMinutes"]).and_then(coerce_int),
        level: pick(parsed, &["level"]).map(value_string),
        warmup: string_list(pick(parsed, &["warmup"])),
        exercises: exercises(pick(parsed, &["exercises"])),
        cooldown: string_list(pick(parsed, &["cooldown"])),
        modifications: modifications(pick(parsed, &["modifications"])),
        raw_text: raw_text.to_string(),
    }
}

/// First non-null value among `keys`.
fn pick<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Integer from a number (truncated) or a digit-only string, surrounding whitespace ignored.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let digits = s.trim();
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()
        }
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(flatten_step).collect(),
        _ => Vec::new(),
    }
}

/// Warmup/cooldown entry as one line: `name | sets:N | rest:Ns | notes:...`.
fn flatten_step(item: &Value) -> String {
    let Value::Object(obj) = item else {
        return value_string(item);
    };

    let mut parts = Vec::new();
    if let Some(name) = pick(obj, &["name"]) {
        parts.push(value_string(name));
    }
    if let Some(sets) = obj.get("sets").and_then(Value::as_i64) {
        parts.push(format!("sets:{sets}"));
    }
    if let Some(rest) = pick(obj, &["rest_seconds", "restSeconds"]).and_then(Value::as_i64) {
        parts.push(format!("rest:{rest}s"));
    }
    if let Some(notes) = pick(obj, &["notes"]) {
        parts.push(format!("notes:{}", value_string(notes)));
    }

    if parts.is_empty() {
        item.to_string()
    } else {
        parts.join(" | ")
    }
}

fn exercises(value: Option<&Value>) -> Vec<ExerciseItem> {
    match value {
        Some(Value::Array(items)) => items.iter().map(exercise).collect(),
        _ => Vec::new(),
    }
}

fn exercise(item: &Value) -> ExerciseItem {
    let Value::Object(obj) = item else {
        return ExerciseItem::named(value_string(item));
    };

    ExerciseItem {
        name: obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(EXERCISE_NAME)
            .to_string(),
        sets: obj.get("sets").and_then(coerce_int).unwrap_or(1),
        reps_or_time: pick(obj, &["reps_or_time", "repsOrTime"])
            .map(value_string)
            .unwrap_or_default(),
        rest_seconds: pick(obj, &["rest_seconds", "restSeconds"]).and_then(coerce_int),
        notes: pick(obj, &["notes"]).map(value_string),
    }
}

fn modifications(value: Option<&Value>) -> BTreeMap<String, String> {
    match value {
        Some(Value::Object(obj)) => obj
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), value_string(v)))
            .collect(),
        _ => BTreeMap::new(),
    }
}
