//! Static metric labels.
//!
//! Labels are constant dimensions (for example the sensor location) attached
//! to every exported metric. They are parsed once from a JSON object and never
//! change afterward.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing a label set.
#[derive(Debug, Error)]
pub enum LabelsError {
    /// The input is not a JSON object of string values.
    #[error("Labels must be a JSON object of string values: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A label name is not a valid Prometheus label name.
    #[error("Invalid label name: '{0}'")]
    InvalidName(String),
}

/// An immutable set of static labels.
///
/// # Example
///
/// ```
/// use shared::config::Labels;
///
/// let labels: Labels = r#"{"location": "greenhouse"}"#.parse().unwrap();
///
/// assert_eq!(labels.get("location"), Some("greenhouse"));
/// assert_eq!(labels.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct Labels(BTreeMap<String, String>);

impl Labels {
    /// Creates an empty label set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a label set from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input is not a JSON object whose values are all strings
    /// - A key is not a valid Prometheus label name
    pub fn from_json(json: &str) -> Result<Self, LabelsError> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)?;
        Self::try_from(map)
    }

    /// Adds a label, replacing any previous value for the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid Prometheus label name.
    pub fn with_label(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, LabelsError> {
        let name = name.into();
        validate_label_name(&name)?;
        self.0.insert(name, value.into());
        Ok(self)
    }

    /// Returns the value of a label.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no labels are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the labels in the shape the metrics library expects for constant labels.
    #[must_use]
    pub fn to_hash_map(&self) -> HashMap<String, String> {
        self.0.clone().into_iter().collect()
    }
}

impl TryFrom<BTreeMap<String, String>> for Labels {
    type Error = LabelsError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        for name in map.keys() {
            validate_label_name(name)?;
        }
        Ok(Self(map))
    }
}

impl From<Labels> for BTreeMap<String, String> {
    fn from(labels: Labels) -> Self {
        labels.0
    }
}

impl FromStr for Labels {
    type Err = LabelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value:?}")?;
        }
        f.write_str("}")
    }
}

/// Checks a name against `[a-zA-Z_][a-zA-Z0-9_]*`, rejecting the reserved `__` prefix.
fn validate_label_name(name: &str) -> Result<(), LabelsError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || name.starts_with("__") {
        return Err(LabelsError::InvalidName(name.to_string()));
    }
    Ok(())
}
