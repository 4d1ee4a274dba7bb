//! Note metadata types.
//!
//! Provides the [`Metadata`] struct holding every key of a document header.
//! Only `title` and `order` carry meaning for the site; all other keys are
//! kept for consumers.
//!
//! # Metadata Fields
//!
//! - `title`: Display title (overrides the filename)
//! - `order`: Sort key among siblings, numbers only

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed document header.
///
/// Values are stored as JSON values so they serialize unchanged for page
/// renderers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    values: Map<String, Value>,
}

impl Metadata {
    /// Create metadata from a JSON object.
    #[must_use]
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Display title, if the header provides a usable one.
    ///
    /// Empty strings, `false`, zero and non-scalar values count as absent.
    /// Numbers and `true` are rendered to text.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self.values.get("title")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|v| v.abs() > f64::EPSILON) => {
                Some(n.to_string())
            }
            Value::Bool(true) => Some("true".to_owned()),
            _ => None,
        }
    }

    /// Sort key, if the header's `order` is a number.
    ///
    /// Non-numeric values (including numeric strings like `"2"`) are ignored.
    #[must_use]
    pub fn order(&self) -> Option<f64> {
        self.values.get("order")?.as_f64()
    }

    /// Raw value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check if the header had no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Header opened with `---` but never closed.
    #[error("Frontmatter is not terminated")]
    Unterminated,
    /// Header is not valid YAML.
    #[error("Invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Header is valid YAML but not a key-value mapping.
    #[error("Frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Parse a raw YAML header into [`Metadata`].
///
/// An empty or whitespace-only header yields empty metadata.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or is not a mapping.
pub fn parse_metadata(header: &str) -> Result<Metadata, MetadataError> {
    if header.trim().is_empty() {
        return Ok(Metadata::default());
    }

    match serde_yaml::from_str::<Value>(header)? {
        Value::Object(values) => Ok(Metadata { values }),
        Value::Null => Ok(Metadata::default()),
        Value::Bool(_) => Err(MetadataError::NotAMapping("a boolean")),
        Value::Number(_) => Err(MetadataError::NotAMapping("a number")),
        Value::String(_) => Err(MetadataError::NotAMapping("a string")),
        Value::Array(_) => Err(MetadataError::NotAMapping("a sequence")),
    }
}
