//! Debounced autocomplete search.
//!
//! Pipeline: keystroke → [`DebouncedSearch::set_query`] → quiet period →
//! [`Lookup::lookup`] → snapshot (only if still the latest query)
//!
//! Each dashboard field owns its own [`DebouncedSearch`]; [`SearchPanel`]
//! bundles the four of them.

mod debounce;
mod field;
mod panel;

pub use debounce::*;
pub use field::*;
pub use panel::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ReferenceItem;

/// Lookup errors. The aggregator absorbs these into an empty result list.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DbError),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),

    #[error("Lookup unavailable: {0}")]
    Unavailable(String),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Source of suggestions for one search domain.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Suggestions for an already normalized query.
    async fn lookup(&self, normalized_query: &str) -> LookupResult<Vec<ReferenceItem>>;
}
