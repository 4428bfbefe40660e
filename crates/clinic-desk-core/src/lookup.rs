//! Store-backed lookups for the search fields.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::warn;

use crate::db::Database;
use crate::models::{ReferenceItem, TermKind};
use crate::search::{Lookup, LookupError, LookupResult};
use crate::seed::common_medications;

/// Medication suggestions. When the store cannot be queried, falls back to
/// every built-in common medication that matches; the limit applies to store
/// results only.
pub struct MedicationLookup {
    db: Arc<Mutex<Database>>,
    limit: Option<usize>,
}

impl MedicationLookup {
    pub fn new(db: Arc<Mutex<Database>>, limit: Option<usize>) -> Self {
        Self { db, limit }
    }

    fn query_store(&self, query: &str) -> LookupResult<Vec<ReferenceItem>> {
        let db = self
            .db
            .lock()
            .map_err(|e| LookupError::Poisoned(e.to_string()))?;
        Ok(db.search_terms(TermKind::Medication, query, self.limit)?)
    }

    fn fallback(&self, query: &str) -> Vec<ReferenceItem> {
        common_medications()
            .into_iter()
            .filter(|m| m.matches(query))
            .collect()
    }

    /// Store results, or the common list if the store fails. Never errors.
    pub fn search(&self, normalized_query: &str) -> Vec<ReferenceItem> {
        match self.query_store(normalized_query) {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, query = normalized_query, "Medication store unavailable, using common list");
                self.fallback(normalized_query)
            }
        }
    }
}

#[async_trait]
impl Lookup for MedicationLookup {
    async fn lookup(&self, normalized_query: &str) -> LookupResult<Vec<ReferenceItem>> {
        Ok(self.search(normalized_query))
    }
}

/// Condition suggestions, unlimited. Store failures are reported to the
/// caller.
pub struct ConditionLookup {
    db: Arc<Mutex<Database>>,
}

impl ConditionLookup {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Lookup for ConditionLookup {
    async fn lookup(&self, normalized_query: &str) -> LookupResult<Vec<ReferenceItem>> {
        let db = self
            .db
            .lock()
            .map_err(|e| LookupError::Poisoned(e.to_string()))?;
        Ok(db.search_terms(TermKind::Condition, normalized_query, None)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_database;

    fn seeded() -> Arc<Mutex<Database>> {
        let mut db = Database::open_in_memory().unwrap();
        seed_database(&mut db).unwrap();
        Arc::new(Mutex::new(db))
    }

    fn break_store(db: &Arc<Mutex<Database>>) {
        db.lock()
            .unwrap()
            .conn()
            .execute_batch("DROP TABLE reference_terms")
            .unwrap();
    }

    #[tokio::test]
    async fn test_medication_lookup() {
        let lookup = MedicationLookup::new(seeded(), Some(10));
        let results = lookup.lookup("cillin").await.unwrap();

        assert!(results.iter().any(|r| r.search == "amoxicillin"));
        assert!(results.iter().any(|r| r.search == "flucloxacillin"));
        assert!(results.len() <= 10);
    }

    #[tokio::test]
    async fn test_medication_limit() {
        let db = seeded();
        let lookup = MedicationLookup::new(db, Some(2));
        assert_eq!(lookup.lookup("in").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_medication_fallback_when_store_fails() {
        let db = seeded();
        break_store(&db);
        let lookup = MedicationLookup::new(db, Some(10));

        let results = lookup.lookup("paracet").await.unwrap();
        assert_eq!(results, vec![ReferenceItem::new("Paracetamol", "paracetamol")]);
    }

    #[tokio::test]
    async fn test_fallback_is_not_capped() {
        let db = seeded();
        break_store(&db);
        let lookup = MedicationLookup::new(db, Some(1));

        let expected = common_medications()
            .into_iter()
            .filter(|m| m.matches("cillin"))
            .count();
        assert!(expected > 1);
        assert_eq!(lookup.lookup("cillin").await.unwrap().len(), expected);
    }

    #[tokio::test]
    async fn test_condition_lookup() {
        let lookup = ConditionLookup::new(seeded());
        let results = lookup.lookup("vertigo").await.unwrap();
        assert_eq!(results[0].search, "benign-paroxysmal-positional-vertigo");
    }

    #[tokio::test]
    async fn test_condition_lookup_reports_failure() {
        let db = seeded();
        break_store(&db);
        let lookup = ConditionLookup::new(db);

        let err = lookup.lookup("gout").await.unwrap_err();
        assert!(matches!(err, LookupError::Database(_)));
    }
}
