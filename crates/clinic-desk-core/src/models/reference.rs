//! Reference search models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A suggestion shown under a search field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ReferenceItem {
    /// Human readable name
    pub display: String,
    /// URL slug used by the reference site
    pub search: String,
}

impl ReferenceItem {
    /// Create an item with an explicit slug from the dataset.
    pub fn new(display: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            search: search.into(),
        }
    }

    /// Create an item whose slug is derived from its display name.
    pub fn from_display(display: &str) -> Self {
        let display = display.trim();
        Self {
            display: display.to_string(),
            search: slugify(display),
        }
    }

    /// Case-insensitive substring match on display name or slug.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.display.to_lowercase().contains(needle) || self.search.to_lowercase().contains(needle)
    }
}

/// Lowercase and join whitespace-separated words with hyphens.
pub fn slugify(display: &str) -> String {
    display
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// A search field's input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub raw: String,
    /// Lowercase, trimmed
    pub normalized: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: raw.trim().to_lowercase(),
        }
    }

    /// Number of characters in the normalized query.
    pub fn len(&self) -> usize {
        self.normalized.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whether the query is long enough to be worth a lookup.
    pub fn is_searchable(&self, min_chars: usize) -> bool {
        self.len() >= min_chars
    }
}

/// Which reference dataset a term belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Medication,
    Condition,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown term kind: {0}")]
pub struct UnknownTermKind(pub String);

impl TermKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TermKind::Medication => "medication",
            TermKind::Condition => "condition",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermKind {
    type Err = UnknownTermKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medication" | "medications" => Ok(TermKind::Medication),
            "condition" | "conditions" => Ok(TermKind::Condition),
            _ => Err(UnknownTermKind(s.to_string())),
        }
    }
}
