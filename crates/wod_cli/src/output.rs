//! Terminal output helpers: styled text for humans, structured JSON for machines.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the exercise and cascade tables
//! - `indicatif` for the wait spinner

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;
use wod_llm::CanonicalRoutine;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn render_json(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg {
        level,
        message,
        data,
    };
    serde_json::to_string(&msg).unwrap_or_else(|_| {
        serde_json::json!({ "level": level, "message": message }).to_string()
    })
}

fn emit_json(level: &str, message: &str, data: Option<&JsonValue>) {
    println!("{}", render_json(level, message, data));
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn header(text: &str) {
    if is_json() {
        emit_json("info", text, None);
    } else {
        println!("{}", style(text).bold().cyan());
    }
}

/// Bulleted line under a section.
pub fn item(text: &str) {
    if !is_json() {
        println!("  {} {}", style("•").green(), text);
    }
}

pub fn section(title: &str) {
    if !is_json() {
        println!();
        println!("{}", style(title).bold());
    }
}

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", render_json("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).bright());
    }
}

/// Error detail for a failed pipeline call, always on stderr.
pub fn diagnostic(payload: &JsonValue) {
    if is_json() {
        eprintln!("{}", render_json("diagnostic", "", Some(payload)));
    } else {
        let formatted =
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
        eprintln!("{}", style(formatted).dim());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        eprintln!("{}", render_json("warning", text, None));
    } else {
        eprintln!("{} {}", style("!").yellow(), style(text).bright());
    }
}

/// Emit an arbitrary serializable value as structured output.
pub fn data<T: Serialize>(label: &str, value: &T) {
    if is_json() {
        let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
        emit_json("data", label, Some(&json_val));
    } else {
        let formatted =
            serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{label}: <?>"));
        println!("{formatted}");
    }
}

/// Print raw text untouched, e.g. a rendered prompt.
pub fn plain(label: &str, text: &str) {
    if is_json() {
        let data = JsonValue::String(text.to_string());
        emit_json("data", label, Some(&data));
    } else {
        println!("{text}");
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if !is_json() {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

// ── Tables ─────────────────────────────────────────────────────────

/// Create a styled table with a bold cyan header row.
pub fn table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan).add_attribute(Attribute::Bold)),
        );
    table
}

/// Add a row; the first cell is highlighted.
pub fn table_row(table: &mut Table, cells: &[String]) {
    table.add_row(cells.iter().enumerate().map(|(i, text)| {
        if i == 0 {
            Cell::new(text).fg(Color::Green)
        } else {
            Cell::new(text)
        }
    }));
}

// ── Routine ────────────────────────────────────────────────────────

/// Show a routine; JSON mode emits it as-is.
pub fn routine(routine: &CanonicalRoutine) {
    if is_json() {
        data("routine", routine);
        return;
    }

    header(&routine.title);
    if let Some(minutes) = routine.duration_minutes {
        kv("Duración", &format!("{minutes} min"));
    }
    if let Some(level) = &routine.level {
        kv("Nivel", level);
    }

    if !routine.warmup.is_empty() {
        section("Calentamiento");
        routine.warmup.iter().for_each(|step| item(step));
    }

    if !routine.exercises.is_empty() {
        section("Ejercicios");
        let mut table = table(&["Ejercicio", "Series", "Reps / tiempo", "Descanso", "Notas"]);
        for exercise in &routine.exercises {
            table_row(
                &mut table,
                &[
                    exercise.name.clone(),
                    exercise.sets.to_string(),
                    exercise.reps_or_time.clone(),
                    exercise
                        .rest_seconds
                        .map(|s| format!("{s}s"))
                        .unwrap_or_default(),
                    exercise.notes.clone().unwrap_or_default(),
                ],
            );
        }
        println!("{table}");
    }

    if !routine.cooldown.is_empty() {
        section("Vuelta a la calma");
        routine.cooldown.iter().for_each(|step| item(step));
    }

    if !routine.modifications.is_empty() {
        section("Modificaciones");
        for (who, change) in &routine.modifications {
            kv(who, change);
        }
    }
}

// ── Spinners ───────────────────────────────────────────────────────

/// Spinner on stderr while waiting on the model; hidden in JSON mode.
pub fn spinner(message: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_envelope_shape() {
        let data = serde_json::json!({ "title": "x" });
        let line = render_json("data", "routine", Some(&data));
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "data");
        assert_eq!(parsed["message"], "routine");
        assert_eq!(parsed["data"]["title"], "x");
    }

    #[test]
    fn test_json_envelope_omits_empty_data() {
        let line = render_json("error", "boom \"quoted\"", None);
        let parsed: JsonValue = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "boom \"quoted\"");
        assert!(parsed.get("data").is_none());
    }
}
