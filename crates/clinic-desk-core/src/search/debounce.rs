//! Per-field debounce and last-query-wins aggregation.
//!
//! Every input change bumps the field's generation. A scheduled lookup sleeps
//! through the debounce window, then checks its generation before firing and
//! again before publishing, so both never-fired and in-flight lookups for an
//! older query are dropped. The check and the publish happen under the watch
//! channel's lock.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::Lookup;
use crate::config::SearchConfig;
use crate::models::{ReferenceItem, SearchQuery};

/// Where a field is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    Querying,
}

/// How a scheduled lookup ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Results published
    Resolved,
    /// Lookup failed; an empty list was published
    Failed,
    /// A newer query took over, before or after the lookup fired
    Superseded,
}

/// Published state of a field.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchSnapshot {
    /// Bumped on every input change
    pub generation: u64,
    pub phase: SearchPhase,
    /// Normalized query the snapshot belongs to
    pub query: String,
    /// Suggestions currently shown
    pub results: Vec<ReferenceItem>,
}

/// Debounced lookup for a single search field.
///
/// Must be driven from inside a tokio runtime: scheduling a lookup spawns a
/// task.
pub struct DebouncedSearch {
    name: &'static str,
    lookup: Arc<dyn Lookup>,
    debounce: Duration,
    min_query_chars: usize,
    state: Arc<watch::Sender<SearchSnapshot>>,
}

impl DebouncedSearch {
    /// Create a field. `name` only labels log events.
    pub fn new(name: &'static str, lookup: Arc<dyn Lookup>, config: &SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Self {
            name,
            lookup,
            debounce: config.debounce(),
            min_query_chars: config.min_query_chars,
            state: Arc::new(state),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    /// Suggestions currently shown.
    pub fn results(&self) -> Vec<ReferenceItem> {
        self.state.borrow().results.clone()
    }

    /// Record an input change.
    ///
    /// Short queries clear the results immediately and return `None`.
    /// Otherwise a lookup is scheduled after the debounce window and its
    /// handle is returned. Results from the previous query stay visible while
    /// the new one is pending.
    pub fn set_query(&self, raw: &str) -> Option<JoinHandle<LookupOutcome>> {
        let query = SearchQuery::new(raw);
        let searchable = query.is_searchable(self.min_query_chars);

        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            generation = s.generation;
            s.query = query.normalized.clone();
            if searchable {
                s.phase = SearchPhase::Debouncing;
            } else {
                s.phase = SearchPhase::Idle;
                s.results.clear();
            }
        });

        if !searchable {
            debug!(field = self.name, query = %query.normalized, "Query too short, skipping lookup");
            return None;
        }

        let task = ScheduledLookup {
            field: self.name,
            generation,
            query: query.normalized,
            debounce: self.debounce,
            lookup: Arc::clone(&self.lookup),
            state: Arc::clone(&self.state),
        };
        Some(tokio::spawn(task.run()))
    }

    /// Drop the query and results, superseding anything pending.
    pub fn clear(&self) {
        self.state.send_modify(|s| {
            s.generation += 1;
            s.phase = SearchPhase::Idle;
            s.query.clear();
            s.results.clear();
        });
    }
}

/// A lookup waiting out its debounce window.
struct ScheduledLookup {
    field: &'static str,
    generation: u64,
    query: String,
    debounce: Duration,
    lookup: Arc<dyn Lookup>,
    state: Arc<watch::Sender<SearchSnapshot>>,
}

impl ScheduledLookup {
    async fn run(self) -> LookupOutcome {
        tokio::time::sleep(self.debounce).await;

        let generation = self.generation;
        let fired = self.state.send_if_modified(|s| {
            if s.generation != generation {
                return false;
            }
            s.phase = SearchPhase::Querying;
            true
        });
        if !fired {
            debug!(field = self.field, query = %self.query, "Superseded before firing");
            return LookupOutcome::Superseded;
        }

        let (results, outcome) = match self.lookup.lookup(&self.query).await {
            Ok(items) => (items, LookupOutcome::Resolved),
            Err(e) => {
                warn!(field = self.field, query = %self.query, error = %e, "Lookup failed");
                (Vec::new(), LookupOutcome::Failed)
            }
        };

        let count = results.len();
        let published = self.state.send_if_modified(move |s| {
            if s.generation != generation {
                return false;
            }
            s.phase = SearchPhase::Idle;
            s.results = results;
            true
        });
        if !published {
            debug!(field = self.field, query = %self.query, "Discarding superseded results");
            return LookupOutcome::Superseded;
        }

        debug!(field = self.field, query = %self.query, count, ?outcome, "Published results");
        outcome
    }
}
