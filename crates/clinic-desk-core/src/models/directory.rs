//! Local phone number directory.

use serde::{Deserialize, Serialize};

/// A useful local service number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalNumber {
    pub name: String,
    /// Phone number as dialled, spaces included
    pub number: String,
    pub category: String,
    pub description: Option<String>,
}

impl LocalNumber {
    pub fn new(name: &str, number: &str, category: &str, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            number: number.to_string(),
            category: category.to_string(),
            description: description.map(str::to_string),
        }
    }

    /// Name or description contain the query ignoring case, or the number
    /// contains it verbatim. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
            || self.number.contains(query)
    }

    /// Exact category match; `None` means all categories.
    pub fn in_category(&self, category: Option<&str>) -> bool {
        category.map_or(true, |c| self.category == c)
    }
}
