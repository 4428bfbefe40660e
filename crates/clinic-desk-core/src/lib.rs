//! Clinic-Desk Core Library
//!
//! Computation and lookup core behind a clinician dashboard.
//!
//! # Architecture
//!
//! ```text
//!  weight, dose/kg, unit ──► clamp_input ──► compute_dose ──► total dose
//!  liquid formulation ─────────────────────────┘        └──► volume (ml)
//!
//!  keystrokes ──► DebouncedSearch (one per field) ──► Lookup ──► Database
//!                   │   300ms quiet period                      (reference_terms)
//!                   │   generation check before fire + publish
//!                   ▼
//!               suggestions ──► SearchField::reference_url ──► BNF / BNFC / CKS
//! ```
//!
//! # Modules
//!
//! - [`dosage`]: Dose and liquid volume calculation
//! - [`search`]: Debounced, last-query-wins autocomplete
//! - [`lookup`]: Store-backed [`search::Lookup`] implementations
//! - [`db`]: SQLite store for reference terms and local numbers
//! - [`models`]: Domain types (DoseRequest, ReferenceItem, LocalNumber, etc.)
//! - [`seed`]: Built-in datasets
//! - [`config`]: Search tunables
//! - [`logging`]: `tracing` subscriber setup

pub mod config;
pub mod db;
pub mod dosage;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod search;
pub mod seed;

// Re-export commonly used types
pub use config::SearchConfig;
pub use db::Database;
pub use dosage::{clamp_input, compute_dose};
pub use lookup::{ConditionLookup, MedicationLookup};
pub use models::{
    DoseRequest, DoseResult, DoseUnit, Frequency, LiquidFormulation, LocalNumber, ReferenceItem,
    SearchQuery, TermKind,
};
pub use search::{DebouncedSearch, Lookup, LookupOutcome, SearchField, SearchPanel};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum ClinicDeskError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for ClinicDeskError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::Json(e) => ClinicDeskError::SerializationError(e.to_string()),
            db::DbError::Invalid(msg) => ClinicDeskError::InvalidInput(msg),
            other => ClinicDeskError::DatabaseError(other.to_string()),
        }
    }
}

impl From<models::UnknownUnit> for ClinicDeskError {
    fn from(e: models::UnknownUnit) -> Self {
        ClinicDeskError::InvalidInput(e.to_string())
    }
}

impl From<models::UnknownTermKind> for ClinicDeskError {
    fn from(e: models::UnknownTermKind) -> Self {
        ClinicDeskError::InvalidInput(e.to_string())
    }
}

impl From<search::UnknownField> for ClinicDeskError {
    fn from(e: search::UnknownField) -> Self {
        ClinicDeskError::InvalidInput(e.to_string())
    }
}

impl From<config::ConfigError> for ClinicDeskError {
    fn from(e: config::ConfigError) -> Self {
        ClinicDeskError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClinicDeskError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        ClinicDeskError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Free Functions (exported to FFI)
// =========================================================================

/// Calculate a weight-based dose. Raw form values are clamped first.
#[uniffi::export]
pub fn calculate_dose(
    weight_kg: f64,
    dose_per_kg: f64,
    dose_unit: String,
    liquid: Option<FfiLiquidFormulation>,
) -> Result<FfiDoseResult, ClinicDeskError> {
    let request = DoseRequest::new(weight_kg, dose_per_kg, dose_unit.parse()?);
    let liquid = liquid.map(LiquidFormulation::try_from).transpose()?;
    Ok(compute_dose(&request, liquid.as_ref()).into())
}

/// Derive the reference-site slug for a display name.
#[uniffi::export]
pub fn slugify_display(display: String) -> String {
    models::slugify(&display)
}

/// Open or create a database at the given path, seeded with built-in data.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<ClinicDeskCore>, ClinicDeskError> {
    let db = Database::open(&path)?;
    ClinicDeskCore::seeded(db, SearchConfig::default())
}

/// Create a seeded in-memory database.
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<ClinicDeskCore>, ClinicDeskError> {
    let db = Database::open_in_memory()?;
    ClinicDeskCore::seeded(db, SearchConfig::default())
}

/// Open a database at the given path with search settings given as JSON.
#[uniffi::export]
pub fn open_database_with_config(
    path: String,
    config_json: String,
) -> Result<Arc<ClinicDeskCore>, ClinicDeskError> {
    let config = SearchConfig::from_json(&config_json)?;
    let db = Database::open(&path)?;
    ClinicDeskCore::seeded(db, config)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI. Host apps debounce on their side
/// and call the search methods directly.
#[derive(uniffi::Object)]
pub struct ClinicDeskCore {
    db: Arc<Mutex<Database>>,
    config: SearchConfig,
}

impl ClinicDeskCore {
    fn seeded(mut db: Database, config: SearchConfig) -> Result<Arc<Self>, ClinicDeskError> {
        seed::seed_database(&mut db)?;
        Ok(Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            config,
        }))
    }

    /// Shared store handle, for building [`MedicationLookup`] and
    /// [`ConditionLookup`].
    pub fn database(&self) -> Arc<Mutex<Database>> {
        Arc::clone(&self.db)
    }

    fn search_conditions_in_store(
        &self,
        query: &str,
    ) -> Result<Vec<FfiReferenceItem>, ClinicDeskError> {
        let query = SearchQuery::new(query);
        if !query.is_searchable(self.config.min_query_chars) {
            return Ok(Vec::new());
        }
        let db = self.db.lock()?;
        let items = db.search_terms(TermKind::Condition, &query.normalized, None)?;
        Ok(items.into_iter().map(|i| i.into()).collect())
    }
}

#[uniffi::export]
impl ClinicDeskCore {
    // =========================================================================
    // Reference Terms
    // =========================================================================

    /// Import one display name per line into the "medication" or
    /// "condition" dataset. Returns the number imported.
    pub fn import_terms(&self, kind: String, text: String) -> Result<u32, ClinicDeskError> {
        let kind: TermKind = kind.parse()?;
        let mut db = self.db.lock()?;
        let count = db.import_terms(kind, &text)?;
        Ok(count as u32)
    }

    /// Medication suggestions (capped by the configured limit). Falls back to
    /// the built-in common medications when the store fails.
    pub fn search_medications(
        &self,
        query: String,
    ) -> Result<Vec<FfiReferenceItem>, ClinicDeskError> {
        let query = SearchQuery::new(&query);
        if !query.is_searchable(self.config.min_query_chars) {
            return Ok(Vec::new());
        }
        let lookup = MedicationLookup::new(self.database(), self.config.medication_limit);
        let items = lookup.search(&query.normalized);
        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    /// Condition suggestions.
    pub fn search_conditions(
        &self,
        query: String,
    ) -> Result<Vec<FfiReferenceItem>, ClinicDeskError> {
        self.search_conditions_in_store(&query)
    }

    /// Reference URL for a slug in a field ("adult", "child", "interaction",
    /// "condition").
    pub fn reference_url(&self, field: String, slug: String) -> Result<String, ClinicDeskError> {
        let field: SearchField = field.parse()?;
        Ok(field.reference_url(&slug))
    }

    // =========================================================================
    // Local Numbers
    // =========================================================================

    /// Search the local number directory.
    pub fn search_local_numbers(
        &self,
        query: String,
        category: Option<String>,
    ) -> Result<Vec<FfiLocalNumber>, ClinicDeskError> {
        let db = self.db.lock()?;
        let entries = db.search_local_numbers(&query, category.as_deref())?;
        Ok(entries.into_iter().map(|e| e.into()).collect())
    }

    /// Directory categories in display order.
    pub fn local_number_categories(&self) -> Result<Vec<String>, ClinicDeskError> {
        let db = self.db.lock()?;
        Ok(db.local_number_categories()?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe liquid formulation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLiquidFormulation {
    pub concentration_amount: f64,
    pub concentration_unit: String,
    pub concentration_volume_ml: f64,
}

impl TryFrom<FfiLiquidFormulation> for LiquidFormulation {
    type Error = ClinicDeskError;

    fn try_from(liquid: FfiLiquidFormulation) -> Result<Self, Self::Error> {
        Ok(LiquidFormulation::new(
            liquid.concentration_amount,
            liquid.concentration_unit.parse()?,
            liquid.concentration_volume_ml,
        ))
    }
}

/// FFI-safe dose result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseResult {
    pub total_dose: f64,
    pub dose_unit: String,
    pub volume_ml: Option<f64>,
    pub volume_display: String,
}

impl From<DoseResult> for FfiDoseResult {
    fn from(result: DoseResult) -> Self {
        Self {
            total_dose: result.total_dose,
            dose_unit: result.dose_unit.to_string(),
            volume_display: result.volume_display(),
            volume_ml: result.volume_ml,
        }
    }
}

/// FFI-safe suggestion.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReferenceItem {
    pub display: String,
    pub search: String,
}

impl From<ReferenceItem> for FfiReferenceItem {
    fn from(item: ReferenceItem) -> Self {
        Self {
            display: item.display,
            search: item.search,
        }
    }
}

/// FFI-safe directory entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLocalNumber {
    pub name: String,
    pub number: String,
    pub category: String,
    pub description: Option<String>,
}

impl From<LocalNumber> for FfiLocalNumber {
    fn from(entry: LocalNumber) -> Self {
        Self {
            name: entry.name,
            number: entry.number,
            category: entry.category,
            description: entry.description,
        }
    }
}
