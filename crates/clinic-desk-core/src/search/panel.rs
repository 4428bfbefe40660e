//! The dashboard's four search fields.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use super::{DebouncedSearch, Lookup, LookupOutcome, SearchField};
use crate::config::SearchConfig;
use crate::models::ReferenceItem;

/// Four isolated debounced fields. Medication fields share a lookup
/// implementation but nothing else: each has its own timer, generation and
/// results.
pub struct SearchPanel {
    adult: DebouncedSearch,
    child: DebouncedSearch,
    interaction: DebouncedSearch,
    condition: DebouncedSearch,
}

impl SearchPanel {
    pub fn new(
        medications: Arc<dyn Lookup>,
        conditions: Arc<dyn Lookup>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            adult: DebouncedSearch::new(
                SearchField::AdultMedication.as_str(),
                Arc::clone(&medications),
                config,
            ),
            child: DebouncedSearch::new(
                SearchField::ChildMedication.as_str(),
                Arc::clone(&medications),
                config,
            ),
            interaction: DebouncedSearch::new(
                SearchField::Interaction.as_str(),
                medications,
                config,
            ),
            condition: DebouncedSearch::new(SearchField::Condition.as_str(), conditions, config),
        }
    }

    pub fn field(&self, field: SearchField) -> &DebouncedSearch {
        match field {
            SearchField::AdultMedication => &self.adult,
            SearchField::ChildMedication => &self.child,
            SearchField::Interaction => &self.interaction,
            SearchField::Condition => &self.condition,
        }
    }

    /// Forward an input change to one field.
    pub fn set_query(&self, field: SearchField, raw: &str) -> Option<JoinHandle<LookupOutcome>> {
        self.field(field).set_query(raw)
    }

    pub fn results(&self, field: SearchField) -> Vec<ReferenceItem> {
        self.field(field).results()
    }

    /// Pick a suggestion: returns its reference URL and clears the field.
    pub fn select(&self, field: SearchField, item: &ReferenceItem) -> String {
        let url = field.reference_url(&item.search);
        info!(field = %field, slug = %item.search, "Suggestion selected");
        self.field(field).clear();
        url
    }

    /// Submit free text: returns the reference URL, if any, and clears the
    /// field when one was produced.
    pub fn submit(&self, field: SearchField, input: &str) -> Option<String> {
        let search = self.field(field);
        let url = field.submission_url(input, &search.results())?;
        info!(field = %field, url = %url, "Search submitted");
        search.clear();
        Some(url)
    }
}
