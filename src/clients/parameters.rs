//! Logical request parameters and their canonical wire form.
//!
//! Domain sections describe a request with [`Parameters`]: an ordered map
//! from logical name to [`ParameterValue`], which may nest objects and lists.
//! [`canonicalize`] flattens that into the flat `key → string` map MWS expects:
//!
//! - lists under `K` become `K.1`, `K.2`, … in input order; empty lists vanish,
//!   and items that flatten to nothing do not consume an index;
//! - nested objects join keys with dots, recursively (`K.1.SubField`);
//! - dates become `YYYY-MM-DDTHH:MM:SS.sssZ` in UTC;
//! - absent values are omitted, never sent as empty strings.
//!
//! # Example
//!
//! ```rust
//! use mws_api::clients::{canonicalize, Parameters};
//!
//! let params = Parameters::new()
//!     .with("MarketplaceId", "A2EUQ1WTGCTBG2")
//!     .with("SellerSKUList.Id", vec!["SKU-1", "SKU-2"]);
//!
//! let canonical = canonicalize(&params).unwrap();
//! assert_eq!(canonical.get("SellerSKUList.Id.1"), Some("SKU-1"));
//! assert_eq!(canonical.get("SellerSKUList.Id.2"), Some("SKU-2"));
//! assert_eq!(canonical.len(), 3);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// A single logical parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterValue {
    /// A string, sent as-is.
    Text(String),
    /// A signed integer.
    Integer(i64),
    /// An unsigned integer.
    Unsigned(u64),
    /// A decimal number; must be finite.
    Decimal(f64),
    /// A boolean, sent as `true`/`false`.
    Boolean(bool),
    /// A point in time, formatted by the canonicalizer.
    Date(DateTime<Utc>),
    /// A sequence, expanded to 1-based indexed keys.
    List(Vec<ParameterValue>),
    /// A nested structure, expanded to dotted keys.
    Object(Parameters),
    /// An optional value that was not provided.
    Absent,
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParameterValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        Self::Unsigned(u64::from(value))
    }
}

impl From<u64> for ParameterValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for ParameterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl From<Parameters> for ParameterValue {
    fn from(value: Parameters) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ParameterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for ParameterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// An insertion-ordered set of logical parameters.
///
/// Inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters {
    entries: Vec<(String, ParameterValue)>,
}

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the key is present (even when its value is absent).
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The flat, wire-ready form of a request's parameters, sorted by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CanonicalParameters {
    entries: BTreeMap<String, String>,
}

impl CanonicalParameters {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) -> Option<String> {
        self.entries.insert(key, value)
    }

    pub(crate) fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

/// A logical parameter set cannot be expressed on the wire.
///
/// This indicates a bug in the calling section, never a runtime condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot canonicalize parameter '{path}': {reason}")]
pub struct CanonicalizationError {
    /// The flattened key path of the offending value.
    pub path: String,
    /// Why the value has no wire mapping.
    pub reason: String,
}

/// Formats a timestamp the way every MWS date parameter expects it.
#[must_use]
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Flattens logical parameters into their canonical wire form.
///
/// # Errors
///
/// Returns [`CanonicalizationError`] naming the offending key path if a key
/// is empty, a decimal is not finite, or two entries flatten to the same key.
pub fn canonicalize(parameters: &Parameters) -> Result<CanonicalParameters, CanonicalizationError> {
    let mut output = CanonicalParameters::new();
    flatten_object(parameters, None, &mut output)?;
    Ok(output)
}

fn flatten_object(
    parameters: &Parameters,
    prefix: Option<&str>,
    output: &mut CanonicalParameters,
) -> Result<(), CanonicalizationError> {
    for (key, value) in parameters.iter() {
        let path = prefix.map_or_else(|| key.to_string(), |p| format!("{p}.{key}"));
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(CanonicalizationError {
                path,
                reason: "key segments must not be empty".to_string(),
            });
        }
        flatten_value(value, path, output)?;
    }
    Ok(())
}

fn flatten_value(
    value: &ParameterValue,
    path: String,
    output: &mut CanonicalParameters,
) -> Result<(), CanonicalizationError> {
    let scalar = match value {
        ParameterValue::Absent => return Ok(()),
        ParameterValue::Object(nested) => return flatten_object(nested, Some(&path), output),
        ParameterValue::List(items) => {
            // Items that emit nothing do not consume an index.
            let mut index = 1;
            for item in items {
                let before = output.len();
                flatten_value(item, format!("{path}.{index}"), output)?;
                if output.len() > before {
                    index += 1;
                }
            }
            return Ok(());
        }
        ParameterValue::Text(text) => text.clone(),
        ParameterValue::Integer(n) => n.to_string(),
        ParameterValue::Unsigned(n) => n.to_string(),
        ParameterValue::Decimal(n) if n.is_finite() => n.to_string(),
        ParameterValue::Decimal(n) => {
            return Err(CanonicalizationError {
                path,
                reason: format!("decimal value {n} has no wire representation"),
            })
        }
        ParameterValue::Boolean(b) => b.to_string(),
        ParameterValue::Date(date) => format_timestamp(date),
    };

    if output.insert(path.clone(), scalar).is_some() {
        return Err(CanonicalizationError {
            path,
            reason: "more than one value flattens to this key".to_string(),
        });
    }
    Ok(())
}
