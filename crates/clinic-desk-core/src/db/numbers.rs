//! Local number directory operations.

use rusqlite::params;

use super::{Database, DbResult};
use crate::models::LocalNumber;

impl Database {
    /// Insert or update a directory entry, keyed by name.
    pub fn upsert_local_number(&self, entry: &LocalNumber) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO local_numbers (name, number, category, description, updated_at)
            VALUES (?1, ?2, ?3, ?4, datetime('now'))
            ON CONFLICT(name) DO UPDATE SET
                number = excluded.number,
                category = excluded.category,
                description = excluded.description,
                updated_at = datetime('now')
            "#,
            params![entry.name, entry.number, entry.category, entry.description],
        )?;
        Ok(())
    }

    /// All entries in a category (or all entries), in insertion order.
    pub fn list_local_numbers(&self, category: Option<&str>) -> DbResult<Vec<LocalNumber>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name, number, category, description
            FROM local_numbers
            WHERE ?1 IS NULL OR category = ?1
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([category], |row| {
            Ok(LocalNumber {
                name: row.get(0)?,
                number: row.get(1)?,
                category: row.get(2)?,
                description: row.get(3)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Search the directory. An empty category means all categories.
    ///
    /// Results are only produced while searching: with neither a query nor a
    /// category, nothing is returned.
    pub fn search_local_numbers(
        &self,
        query: &str,
        category: Option<&str>,
    ) -> DbResult<Vec<LocalNumber>> {
        let category = category.filter(|c| !c.is_empty());
        if query.is_empty() && category.is_none() {
            return Ok(Vec::new());
        }

        let entries = self.list_local_numbers(category)?;
        Ok(entries
            .into_iter()
            .filter(|e| e.matches_query(query))
            .collect())
    }

    /// Distinct categories in first-seen order.
    pub fn local_number_categories(&self) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT category
            FROM local_numbers
            GROUP BY category
            ORDER BY MIN(id)
            "#,
        )?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row?);
        }
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        for entry in [
            LocalNumber::new("City Hospital", "0121 554 3801", "Hospitals", Some("Emergency and general enquiries")),
            LocalNumber::new("GP Out of Hours", "111", "Primary Care", None),
            LocalNumber::new("Dental Hospital", "0121 466 5000", "Hospitals", None),
            LocalNumber::new("Samaritans", "116 123", "Support Services", Some("Emotional support")),
        ] {
            db.upsert_local_number(&entry).unwrap();
        }
        db
    }

    #[test]
    fn test_search_by_name() {
        let db = setup_db();
        let results = db.search_local_numbers("hospital", None).unwrap();
        let names: Vec<_> = results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["City Hospital", "Dental Hospital"]);
    }

    #[test]
    fn test_search_by_description_and_number() {
        let db = setup_db();
        assert_eq!(db.search_local_numbers("emotional", None).unwrap()[0].name, "Samaritans");
        assert_eq!(db.search_local_numbers("466", None).unwrap()[0].name, "Dental Hospital");
    }

    #[test]
    fn test_category_only() {
        let db = setup_db();
        let results = db.search_local_numbers("", Some("Primary Care")).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].number, "111");
    }

    #[test]
    fn test_query_and_category() {
        let db = setup_db();
        assert!(db.search_local_numbers("samaritans", Some("Hospitals")).unwrap().is_empty());
    }

    #[test]
    fn test_nothing_without_search() {
        let db = setup_db();
        assert!(db.search_local_numbers("", None).unwrap().is_empty());
        assert!(db.search_local_numbers("", Some("")).unwrap().is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let db = setup_db();
        assert_eq!(
            db.local_number_categories().unwrap(),
            vec!["Hospitals", "Primary Care", "Support Services"]
        );
    }

    #[test]
    fn test_upsert_updates() {
        let db = setup_db();
        db.upsert_local_number(&LocalNumber::new("Samaritans", "116 000", "Support Services", None))
            .unwrap();

        let all = db.list_local_numbers(None).unwrap();
        assert_eq!(all.len(), 4);
        let samaritans = all.iter().find(|e| e.name == "Samaritans").unwrap();
        assert_eq!(samaritans.number, "116 000");
        assert_eq!(samaritans.description, None);
    }
}
