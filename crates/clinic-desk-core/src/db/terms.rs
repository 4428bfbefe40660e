//! Reference term operations.

use rusqlite::{params, Connection};
use serde::Deserialize;

use super::{Database, DbError, DbResult};
use crate::config::DEFAULT_MIN_QUERY_CHARS;
use crate::models::{ReferenceItem, SearchQuery, TermKind};

/// Separator between display and slug in the match column. Never typed.
const HAYSTACK_SEPARATOR: char = '\u{1f}';

/// Dataset record; `search` falls back to the slugified display name.
#[derive(Debug, Deserialize)]
struct TermRecord {
    display: String,
    #[serde(default)]
    search: Option<String>,
}

impl Database {
    /// Insert or update a reference term, keyed by kind and slug.
    pub fn upsert_term(&self, kind: TermKind, item: &ReferenceItem) -> DbResult<()> {
        insert_term(&self.conn, kind, item)
    }

    /// Import one display name per line, deriving slugs. Blank lines are
    /// skipped. Returns the number of lines imported.
    pub fn import_terms(&mut self, kind: TermKind, text: &str) -> DbResult<usize> {
        let items: Vec<ReferenceItem> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(ReferenceItem::from_display)
            .collect();
        self.import_items(kind, &items)
    }

    /// Import a JSON array of `{"display": .., "search": ..}` records.
    /// Records without `search` get a derived slug.
    pub fn import_terms_json(&mut self, kind: TermKind, json: &str) -> DbResult<usize> {
        let records: Vec<TermRecord> = serde_json::from_str(json)?;
        let items: Vec<ReferenceItem> = records
            .into_iter()
            .map(|r| match r.search {
                Some(search) => ReferenceItem::new(r.display.trim(), search.trim()),
                None => ReferenceItem::from_display(&r.display),
            })
            .collect();
        self.import_items(kind, &items)
    }

    /// Import items in a single transaction.
    pub fn import_items(&mut self, kind: TermKind, items: &[ReferenceItem]) -> DbResult<usize> {
        let tx = self.conn.transaction()?;
        for item in items {
            insert_term(&tx, kind, item)?;
        }
        tx.commit()?;
        Ok(items.len())
    }

    /// Case-insensitive substring search on display name or slug, in dataset
    /// order. Queries shorter than the minimum length return nothing.
    pub fn search_terms(
        &self,
        kind: TermKind,
        query: &str,
        limit: Option<usize>,
    ) -> DbResult<Vec<ReferenceItem>> {
        let query = SearchQuery::new(query);
        if !query.is_searchable(DEFAULT_MIN_QUERY_CHARS) {
            return Ok(Vec::new());
        }

        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let mut stmt = self.conn.prepare(
            r#"
            SELECT display, search
            FROM reference_terms
            WHERE kind = ?1 AND instr(haystack, ?2) > 0
            ORDER BY id
            LIMIT ?3
            "#,
        )?;

        let rows = stmt.query_map(params![kind.as_str(), query.normalized, limit], |row| {
            Ok(ReferenceItem {
                display: row.get(0)?,
                search: row.get(1)?,
            })
        })?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    /// Number of stored terms of a kind.
    pub fn count_terms(&self, kind: TermKind) -> DbResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM reference_terms WHERE kind = ?",
            [kind.as_str()],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Delete a term by slug.
    pub fn delete_term(&self, kind: TermKind, search: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM reference_terms WHERE kind = ?1 AND search = ?2",
            params![kind.as_str(), search],
        )?;
        Ok(rows_affected > 0)
    }
}

fn insert_term(conn: &Connection, kind: TermKind, item: &ReferenceItem) -> DbResult<()> {
    if item.display.is_empty() || item.search.is_empty() {
        return Err(DbError::Invalid(format!(
            "term needs a display name and slug: {:?}",
            item
        )));
    }

    let haystack = format!(
        "{}{}{}",
        item.display.to_lowercase(),
        HAYSTACK_SEPARATOR,
        item.search.to_lowercase()
    );

    conn.execute(
        r#"
        INSERT INTO reference_terms (kind, display, search, haystack)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(kind, search) DO UPDATE SET
            display = excluded.display,
            haystack = excluded.haystack
        "#,
        params![kind.as_str(), item.display, item.search, haystack],
    )?;
    Ok(())
}
