//! Request and result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What the caller asked for. Only used to render the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub level: String,
    pub duration_minutes: u32,
    pub goals: String,
}

impl GenerationRequest {
    pub fn new(level: impl Into<String>, duration_minutes: u32, goals: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            duration_minutes,
            goals: goals.into(),
        }
    }
}

/// One exercise in the main block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub name: String,
    pub sets: i64,
    pub reps_or_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExerciseItem {
    /// Bare item with one set and no reps, as produced for non-object entries.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: 1,
            reps_or_time: String::new(),
            rest_seconds: None,
            notes: None,
        }
    }
}

/// Normalised routine. Every field is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRoutine {
    pub title: String,
    pub duration_minutes: Option<i64>,
    pub level: Option<String>,
    pub warmup: Vec<String>,
    pub exercises: Vec<ExerciseItem>,
    pub cooldown: Vec<String>,
    pub modifications: BTreeMap<String, String>,
    /// Full extracted model text, kept for debugging and re-processing
    pub raw_text: String,
}
