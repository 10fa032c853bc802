//! Ordered string collections (tags, eligible fields, eligible levels).
//!
//! Stored as native `TEXT[]`. Older catalog exports carry the same lists as a
//! JSON array encoded inside a string (`"[\"STEM\",\"Research\"]"`); both forms
//! are accepted on input and the list is always written back as an array.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagListError {
    #[error("serialized tag list is not a JSON array of strings: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Parses the serialized-text form. Blank input and `null` mean an empty list.
    pub fn parse_serialized(text: &str) -> Result<Self, TagListError> {
        let text = text.trim();
        if text.is_empty() || text == "null" {
            return Ok(Self::default());
        }
        Ok(Self(serde_json::from_str::<Vec<String>>(text)?))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Comma-joined rendering used in prompts; `empty` is returned for an empty list.
    pub fn join_or(&self, empty: &str) -> String {
        if self.0.is_empty() {
            empty.to_string()
        } else {
            self.0.join(", ")
        }
    }
}

impl From<Vec<String>> for TagList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

impl From<&[&str]> for TagList {
    fn from(items: &[&str]) -> Self {
        Self(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<'de> Deserialize<'de> for TagList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            List(Vec<String>),
            Serialized(String),
            Null(()),
        }

        match Wire::deserialize(deserializer)? {
            Wire::List(items) => Ok(Self(items)),
            Wire::Serialized(text) => Self::parse_serialized(&text).map_err(serde::de::Error::custom),
            Wire::Null(()) => Ok(Self::default()),
        }
    }
}
