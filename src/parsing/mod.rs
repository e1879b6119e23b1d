//! Schema-driven decoding of MWS response documents.
//!
//! Response bodies are first converted into a generic [`Value`] tree (see
//! [`xml::parse_document`]) and then decoded into typed results through the
//! [`Decode`] trait. Decoding is all-or-nothing: the first structural
//! mismatch produces a [`ParsingError`] naming the full field path together
//! with the expected and actual shapes.
//!
//! # Conventions
//!
//! - Required fields must be present; unknown extra fields are ignored.
//! - Optional fields decode to `None` when absent, never to a default.
//! - Enumerated fields decode only from their closed set (see [`closed_enum!`]).
//! - Sequences accept both a bare item and an array of items, since the XML
//!   conversion collapses single-element lists.
//!
//! # Example
//!
//! ```rust
//! use mws_api::parsing::{decode_envelope, Decode, Fields, FieldPath, ParsingError};
//! use serde_json::{json, Value};
//!
//! struct Greeting {
//!     text: String,
//! }
//!
//! impl Decode for Greeting {
//!     fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
//!         let fields = Fields::new(value, path)?;
//!         Ok(Self { text: fields.required("Text")? })
//!     }
//! }
//!
//! let document = json!({"HelloResponse": {"HelloResult": {"Text": "hi"}}});
//! let greeting: Greeting = decode_envelope("Hello", &document).unwrap();
//! assert_eq!(greeting.text, "hi");
//! ```

pub mod xml;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;

/// A location inside a decoded document, rendered as `$.A.B[0]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

impl FieldPath {
    /// Returns the document root (`$`).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended with a field name.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Field(name.to_string()));
        Self { segments }
    }

    /// Returns a new path extended with a sequence index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Returns `true` for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A response document did not match the expected schema.
///
/// # Example
///
/// ```rust
/// use mws_api::parsing::{Decode, FieldPath};
/// use serde_json::json;
///
/// let error = <u32 as Decode>::decode(&json!("many"), &FieldPath::root().field("Count")).unwrap_err();
/// assert_eq!(error.path, "$.Count");
/// assert_eq!(
///     error.to_string(),
///     r#"Expected an unsigned integer at $.Count, but received a string with value "many""#
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Expected {expected} at {path}, but received {actual}")]
pub struct ParsingError {
    /// The full path of the offending field.
    pub path: String,
    /// The shape the schema required.
    pub expected: String,
    /// A description of what was actually present.
    pub actual: String,
}

impl ParsingError {
    /// Creates an error for `value` found at `path` where `expected` was required.
    #[must_use]
    pub fn mismatch(path: &FieldPath, expected: impl Into<String>, value: &Value) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.into(),
            actual: describe(value),
        }
    }

    /// Creates an error for a required field that is absent.
    #[must_use]
    pub fn missing(path: &FieldPath, expected: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            expected: expected.into(),
            actual: "nothing".to_string(),
        }
    }
}

/// Describes a value's shape for diagnostics.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("a boolean with value {b}"),
        Value::Number(n) => format!("a number with value {n}"),
        Value::String(s) => format!("a string with value {s:?}"),
        Value::Array(items) => format!("an array with {} items", items.len()),
        Value::Object(_) => "an object".to_string(),
    }
}

/// A type that can be decoded from a response document.
pub trait Decode: Sized {
    /// Decodes `value`, found at `path`, into `Self`.
    ///
    /// # Errors
    ///
    /// Returns [`ParsingError`] if `value` does not have the required shape.
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError>;
}

/// Text content of a leaf element, whatever scalar the tree holds.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Decode for String {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        scalar_text(value).ok_or_else(|| ParsingError::mismatch(path, "a string", value))
    }
}

impl Decode for bool {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(ParsingError::mismatch(path, "a boolean", value)),
        }
    }
}

macro_rules! decode_number {
    ($ty:ty, $expected:literal) => {
        impl Decode for $ty {
            fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
                scalar_text(value)
                    .and_then(|text| text.trim().parse::<$ty>().ok())
                    .ok_or_else(|| ParsingError::mismatch(path, $expected, value))
            }
        }
    };
}

decode_number!(u32, "an unsigned integer");
decode_number!(u64, "an unsigned integer");
decode_number!(i64, "an integer");
decode_number!(f64, "a number");

impl Decode for DateTime<Utc> {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        scalar_text(value)
            .and_then(|text| DateTime::parse_from_rfc3339(text.trim()).ok())
            .map(|date| date.with_timezone(&Utc))
            .ok_or_else(|| ParsingError::mismatch(path, "an ISO-8601 timestamp", value))
    }
}

/// Calendar dates arrive either bare (`2020-12-27`) or as full timestamps.
impl Decode for NaiveDate {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        scalar_text(value)
            .and_then(|text| {
                let text = text.trim();
                NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
                    DateTime::parse_from_rfc3339(text)
                        .ok()
                        .map(|date| date.with_timezone(&Utc).date_naive())
                })
            })
            .ok_or_else(|| ParsingError::mismatch(path, "a calendar date", value))
    }
}

/// Sequences accept a bare item as a one-element sequence.
impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::decode(item, &path.index(i)))
                .collect(),
            single => Ok(vec![T::decode(single, &path.index(0))?]),
        }
    }
}

/// The raw subtree, for callers that want to inspect a result themselves.
impl Decode for Value {
    fn decode(value: &Value, _path: &FieldPath) -> Result<Self, ParsingError> {
        Ok(value.clone())
    }
}

/// Result of an action whose result element carries no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Empty;

impl Decode for Empty {
    fn decode(value: &Value, path: &FieldPath) -> Result<Self, ParsingError> {
        match value {
            Value::Object(_) => Ok(Self),
            Value::String(s) if s.trim().is_empty() => Ok(Self),
            other => Err(ParsingError::mismatch(path, "an empty element", other)),
        }
    }
}

/// Field accessor over an object node.
///
/// Created with [`Fields::new`], which fails unless the node is an object.
#[derive(Debug)]
pub struct Fields<'a> {
    map: &'a serde_json::Map<String, Value>,
    path: &'a FieldPath,
}

impl<'a> Fields<'a> {
    /// Wraps `value` as an object.
    ///
    /// # Errors
    ///
    /// Returns [`ParsingError`] if `value` is not an object.
    pub fn new(value: &'a Value, path: &'a FieldPath) -> Result<Self, ParsingError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(ParsingError::mismatch(path, "an object", other)),
        }
    }

    /// Returns the raw value of a field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name)
    }

    /// Decodes a required field.
    ///
    /// # Errors
    ///
    /// Returns [`ParsingError`] if the field is absent or malformed.
    pub fn required<T: Decode>(&self, name: &str) -> Result<T, ParsingError> {
        let path = self.path.field(name);
        match self.map.get(name) {
            Some(value) => T::decode(value, &path),
            None => Err(ParsingError::missing(&path, format!("a field named {name}"))),
        }
    }

    /// Decodes an optional field; absent fields yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ParsingError`] if the field is present but malformed.
    pub fn optional<T: Decode>(&self, name: &str) -> Result<Option<T>, ParsingError> {
        let path = self.path.field(name);
        self.map
            .get(name)
            .map(|value| T::decode(value, &path))
            .transpose()
    }

    /// Decodes a required list wrapper such as
    /// `<SKUInboundGuidanceList><SKUInboundGuidance/>…</SKUInboundGuidanceList>`.
    ///
    /// The wrapper must be present; an empty wrapper decodes to an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ParsingError`] if the wrapper is absent or an item is malformed.
    pub fn list<T: Decode>(&self, name: &str, item_tag: &str) -> Result<Vec<T>, ParsingError> {
        let path = self.path.field(name);
        match self.map.get(name) {
            Some(wrapper) => decode_wrapped_list(wrapper, &path, item_tag),
            None => Err(ParsingError::missing(&path, format!("a list named {name}"))),
        }
    }

    /// Decodes an optional list wrapper; an absent wrapper yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ParsingError`] if an item is malformed.
    pub fn optional_list<T: Decode>(
        &self,
        name: &str,
        item_tag: &str,
    ) -> Result<Option<Vec<T>>, ParsingError> {
        let path = self.path.field(name);
        self.map
            .get(name)
            .map(|wrapper| decode_wrapped_list(wrapper, &path, item_tag))
            .transpose()
    }
}

fn decode_wrapped_list<T: Decode>(
    wrapper: &Value,
    path: &FieldPath,
    item_tag: &str,
) -> Result<Vec<T>, ParsingError> {
    match wrapper {
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::Object(map) => match map.get(item_tag) {
            Some(items) => Vec::<T>::decode(items, &path.field(item_tag)),
            None => Ok(Vec::new()),
        },
        other => Err(ParsingError::mismatch(
            path,
            format!("a list of {item_tag} elements"),
            other,
        )),
    }
}

/// Unwraps the `<Action>Response` and `<Action>Result` envelope layers and
/// decodes the result payload.
///
/// # Errors
///
/// Returns [`ParsingError`] if either envelope layer is missing or the
/// payload does not match `T`.
pub fn decode_envelope<T: Decode>(action: &str, document: &Value) -> Result<T, ParsingError> {
    let root = FieldPath::root();
    let response_tag = format!("{action}Response");
    let result_tag = format!("{action}Result");

    let response_path = root.field(&response_tag);
    let response = Fields::new(document, &root)?
        .get(&response_tag)
        .ok_or_else(|| ParsingError::missing(&response_path, format!("a field named {response_tag}")))?;

    Fields::new(response, &response_path)?.required(&result_tag)
}

/// Declares a string-backed enum that decodes only from its named values.
///
/// # Example
///
/// ```rust
/// use mws_api::closed_enum;
/// use mws_api::parsing::{Decode, FieldPath};
/// use serde_json::json;
///
/// closed_enum! {
///     /// Traffic light.
///     pub enum Light {
///         Green => "GREEN",
///         Red => "RED",
///     }
/// }
///
/// assert_eq!(Light::decode(&json!("RED"), &FieldPath::root()).unwrap(), Light::Red);
/// assert!(Light::decode(&json!("BLUE"), &FieldPath::root()).is_err());
/// assert_eq!(Light::Green.as_str(), "GREEN");
/// ```
#[macro_export]
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All values, in declaration order.
            pub const VALUES: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::parsing::Decode for $name {
            fn decode(
                value: &::serde_json::Value,
                path: &$crate::parsing::FieldPath,
            ) -> ::std::result::Result<Self, $crate::parsing::ParsingError> {
                match value.as_str() {
                    $( Some($wire) => Ok(Self::$variant), )+
                    _ => Err($crate::parsing::ParsingError::mismatch(
                        path,
                        concat!("one of ", stringify!($name), " [", $($wire, " ",)+ "]"),
                        value,
                    )),
                }
            }
        }

        impl ::std::convert::From<$name> for $crate::clients::ParameterValue {
            fn from(value: $name) -> Self {
                Self::Text(value.as_str().to_string())
            }
        }
    };
}
