//! Dashboard search fields and their reference-site redirects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{slugify, ReferenceItem, TermKind};

/// One of the four independent search boxes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// BNF adult drug monographs
    AdultMedication,
    /// BNF for Children drug monographs
    ChildMedication,
    /// BNF for Children interaction checker
    Interaction,
    /// NICE Clinical Knowledge Summaries
    Condition,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown search field: {0}")]
pub struct UnknownField(pub String);

impl SearchField {
    pub const ALL: [SearchField; 4] = [
        SearchField::AdultMedication,
        SearchField::ChildMedication,
        SearchField::Interaction,
        SearchField::Condition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::AdultMedication => "adult",
            SearchField::ChildMedication => "child",
            SearchField::Interaction => "interaction",
            SearchField::Condition => "condition",
        }
    }

    /// Dataset the field draws suggestions from.
    pub fn term_kind(self) -> TermKind {
        match self {
            SearchField::Condition => TermKind::Condition,
            _ => TermKind::Medication,
        }
    }

    /// External page for a slug.
    pub fn reference_url(self, slug: &str) -> String {
        match self {
            SearchField::AdultMedication => {
                format!("https://bnf.nice.org.uk/drugs/{}/#indications-and-dose", slug)
            }
            SearchField::ChildMedication => {
                format!("https://bnfc.nice.org.uk/drugs/{}/#indications-and-dose", slug)
            }
            SearchField::Interaction => format!("https://bnfc.nice.org.uk/interactions/{}/", slug),
            SearchField::Condition => format!("https://cks.nice.org.uk/topics/{}/management/", slug),
        }
    }

    /// URL for free text submitted without picking a suggestion.
    ///
    /// A suggestion whose display name or slug equals the input (ignoring
    /// case) supplies its slug; otherwise the input is slugified. Blank input
    /// goes nowhere.
    pub fn submission_url(self, input: &str, suggestions: &[ReferenceItem]) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let lower = input.to_lowercase();
        let slug = suggestions
            .iter()
            .find(|s| s.display.to_lowercase() == lower || s.search.to_lowercase() == lower)
            .map(|s| s.search.clone())
            .unwrap_or_else(|| slugify(trimmed));

        Some(self.reference_url(&slug))
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adult" | "bnf" => Ok(SearchField::AdultMedication),
            "child" | "bnfc" => Ok(SearchField::ChildMedication),
            "interaction" | "interactions" => Ok(SearchField::Interaction),
            "condition" | "cks" => Ok(SearchField::Condition),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}
