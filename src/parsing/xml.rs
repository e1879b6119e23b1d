//! Conversion of MWS XML response bodies into a generic [`Value`] tree.
//!
//! The mapping mirrors what the decoder expects:
//!
//! - every element becomes an object key named by its local name;
//! - repeated sibling elements become an array, a single one stays bare;
//! - text-only elements become strings, untrimmed; empty elements become `""`;
//! - mixed content keeps its text under `#text`, minus whitespace-only runs
//!   between child elements;
//! - attributes, comments and processing instructions are dropped.
//!
//! A body that is empty or not XML at all becomes a plain string value, so
//! the decoder reports it at the document root instead of failing here.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::parsing::ParsingError;

const TEXT_KEY: &str = "#text";

#[derive(Default)]
struct Element {
    name: String,
    children: Map<String, Value>,
    text: String,
    // Text without the whitespace-only runs; used once the element has children.
    mixed_text: String,
}

impl Element {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    fn into_value(self) -> Value {
        if self.children.is_empty() {
            return Value::String(self.text);
        }
        let mut children = self.children;
        if !self.mixed_text.is_empty() {
            children.insert(TEXT_KEY.to_string(), Value::String(self.mixed_text));
        }
        Value::Object(children)
    }

    fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
        if !text.trim().is_empty() {
            self.mixed_text.push_str(text);
        }
    }

    fn push_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

/// Parses a response body into a [`Value`] tree.
///
/// # Errors
///
/// Returns [`ParsingError`] at the document root if the body looks like XML
/// but is not well-formed.
///
/// # Example
///
/// ```rust
/// use mws_api::parsing::xml::parse_document;
/// use serde_json::json;
///
/// let body = "<A><B>1</B><B>2</B><C/></A>";
/// assert_eq!(parse_document(body).unwrap(), json!({"A": {"B": ["1", "2"], "C": ""}}));
/// assert_eq!(parse_document("").unwrap(), json!(""));
/// ```
pub fn parse_document(body: &str) -> Result<Value, ParsingError> {
    let trimmed = body.trim();
    if !trimmed.starts_with('<') {
        return Ok(Value::String(trimmed.to_string()));
    }

    let malformed = |reason: String| ParsingError {
        path: "$".to_string(),
        expected: "a well-formed XML document".to_string(),
        actual: reason,
    };

    let mut reader = Reader::from_str(trimmed);

    // The document node collects the root element.
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                stack.push(Element::named(name));
            }
            Ok(Event::Empty(empty)) => {
                let name = String::from_utf8_lossy(empty.local_name().as_ref()).into_owned();
                if let Some(parent) = stack.last_mut() {
                    parent.push_child(name, Value::String(String::new()));
                }
            }
            Ok(Event::Text(text)) => {
                let text = text
                    .unescape()
                    .map_err(|e| malformed(format!("invalid text content ({e})")))?;
                if let Some(current) = stack.last_mut() {
                    current.push_text(&text);
                }
            }
            Ok(Event::CData(data)) => {
                let data = data.into_inner();
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data));
                    current.mixed_text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Ok(Event::End(_)) => {
                if stack.len() < 2 {
                    return Err(malformed("an unmatched closing tag".to_string()));
                }
                if let Some(element) = stack.pop() {
                    let name = element.name.clone();
                    let value = element.into_value();
                    if let Some(parent) = stack.last_mut() {
                        parent.push_child(name, value);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(malformed(format!(
                    "a parse error at byte {} ({e})",
                    reader.buffer_position()
                )))
            }
        }
    }

    if stack.len() != 1 {
        return Err(malformed("an unterminated element".to_string()));
    }

    let document = stack.pop().unwrap_or_default();
    Ok(Value::Object(document.children))
}
