//! Envelope extractor: find the generated text inside whichever response shape the
//! upstream answered with.
//!
//! Known shapes:
//!
//! ```text
//! Responses API     { "output":  [ { "content": [ { "text": "..." } ] } ] }
//! Chat Completions  { "choices": [ { "message": { "content": "..." } } ] }
//! Completions       { "choices": [ { "text": "..." } ] }
//! Local (Ollama)    { "response": "..." }
//! ```
//!
//! Extraction is total: unknown shapes fall back to the JSON dump of the envelope.

use serde_json::{Map, Value};

/// Keys probed, in order, for the list of generated items.
const ITEM_LISTS: [&str; 2] = ["output", "choices"];

/// Recognised envelope shape, borrowed from the decoded body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope<'a> {
    /// First content block of the first output item
    ContentBlock(&'a Map<String, Value>),
    /// Chat choice carrying a `message` (or streaming `delta`) object
    ChatChoice {
        choice: &'a Map<String, Value>,
        message: &'a Map<String, Value>,
    },
    /// Any other object item; read its `text`
    TextItem(&'a Map<String, Value>),
    /// First item is not an object
    Scalar(&'a Value),
    /// Flat `response` string from a local model
    Local(&'a str),
    /// Nothing recognised
    Unknown(&'a Value),
}

impl<'a> Envelope<'a> {
    /// Classify a decoded envelope. First match wins.
    pub fn classify(envelope: &'a Value) -> Self {
        let first_item = ITEM_LISTS.iter().find_map(|key| {
            envelope
                .get(*key)
                .and_then(Value::as_array)
                .and_then(|items| items.first())
        });

        if let Some(item) = first_item {
            return match item.as_object() {
                Some(obj) => Self::classify_item(obj),
                None => Envelope::Scalar(item),
            };
        }

        match envelope.get("response").and_then(Value::as_str) {
            Some(response) => Envelope::Local(response),
            None => Envelope::Unknown(envelope),
        }
    }

    fn classify_item(item: &'a Map<String, Value>) -> Self {
        let first_block = item
            .get("content")
            .and_then(Value::as_array)
            .and_then(|blocks| blocks.first())
            .and_then(Value::as_object);
        if let Some(block) = first_block {
            return Envelope::ContentBlock(block);
        }

        let message = ["message", "delta"]
            .iter()
            .find_map(|key| item.get(*key).and_then(Value::as_object));
        match message {
            Some(message) => Envelope::ChatChoice {
                choice: item,
                message,
            },
            None => Envelope::TextItem(item),
        }
    }

    /// The generated text for this shape. Never fails; may be empty.
    pub fn text(&self) -> String {
        match self {
            Envelope::ContentBlock(block) => field_text(block, "text").unwrap_or_default(),
            Envelope::ChatChoice { choice, message } => field_text(message, "content")
                .or_else(|| field_text(message, "text"))
                .or_else(|| field_text(choice, "text"))
                .unwrap_or_default(),
            Envelope::TextItem(item) => field_text(item, "text").unwrap_or_default(),
            Envelope::Scalar(value) => value_string(value),
            Envelope::Local(response) => response.trim().to_string(),
            Envelope::Unknown(value) => serde_json::to_string(value).unwrap_or_default(),
        }
    }
}

/// Extract the generated text from a decoded envelope.
pub fn extract_text(envelope: &Value) -> String {
    Envelope::classify(envelope).text()
}

/// Non-empty text held under `key`. Arrays of content blocks are concatenated.
fn field_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match obj.get(key)? {
        Value::Null => return None,
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(|block| match block {
                Value::String(s) => Some(s.as_str()),
                other => other.get("text").and_then(Value::as_str),
            })
            .collect::<String>(),
        other => value_string(other),
    };
    (!text.is_empty()).then_some(text)
}

/// Strings as-is, everything else as compact JSON.
pub(crate) fn value_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
