//! Embedded-JSON carver. Tolerates prose and markdown fences around the object.

use serde_json::{Map, Value};

/// Parse the widest `{ ... }` span of `text`: first `{` to last `}`.
///
/// Returns `None` when there is no such span or it does not parse as a JSON object.
/// Multiple objects, or stray braces in the surrounding prose, defeat the heuristic.
pub fn carve_json(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&trimmed[start..=end]) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_carves_object_out_of_noise() {
        let obj = carve_json("noise {\"a\":1} noise").unwrap();
        assert_eq!(Value::Object(obj), json!({ "a": 1 }));
    }

    #[test]
    fn test_markdown_fence() {
        let text = "Aquí tienes:\n```json\n{\"title\": \"WOD\", \"warmup\": [\"trote\"]}\n```\n¡Suerte!";
        let obj = carve_json(text).unwrap();
        assert_eq!(obj["title"], "WOD");
    }

    #[test]
    fn test_no_braces() {
        assert!(carve_json("no braces here").is_none());
        assert!(carve_json("").is_none());
    }

    #[test]
    fn test_unbalanced() {
        assert!(carve_json("{unbalanced").is_none());
        assert!(carve_json("} backwards {").is_none());
        assert!(carve_json("{\"a\": {\"b\": 1}").is_none());
    }

    #[test]
    fn test_two_objects_is_a_known_miss() {
        assert!(carve_json("{\"a\":1} and {\"b\":2}").is_none());
    }

    #[test]
    fn test_braces_inside_strings_survive() {
        let obj = carve_json("x {\"notes\": \"use {band}\"} y").unwrap();
        assert_eq!(obj["notes"], "use {band}");
    }
}
