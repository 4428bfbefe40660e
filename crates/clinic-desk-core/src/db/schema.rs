//! SQLite schema definition.

/// Complete database schema for clinic-desk.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Reference Terms (medications and conditions offered as suggestions)
-- ============================================================================

CREATE TABLE IF NOT EXISTS reference_terms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,       -- preserves dataset order
    kind TEXT NOT NULL CHECK (kind IN ('medication', 'condition')),
    display TEXT NOT NULL,
    search TEXT NOT NULL,                       -- URL slug
    haystack TEXT NOT NULL,                     -- lowercase display + slug, for matching
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE (kind, search)
);

CREATE INDEX IF NOT EXISTS idx_terms_kind ON reference_terms(kind);

-- ============================================================================
-- Local Numbers
-- ============================================================================

CREATE TABLE IF NOT EXISTS local_numbers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    number TEXT NOT NULL,
    category TEXT NOT NULL,
    description TEXT,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_numbers_category ON local_numbers(category);
"#;
