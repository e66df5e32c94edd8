//! SQLite storage backend
//!
//! Tables follow the wiki layout the engine was built against: `page` holds
//! one row per item and `categorylinks` one row per (item, category) pair.

use super::traits::{CategoryStore, OpenStore, StorageError, StorageResult, TitleResolver};
use crate::item::{ItemId, PageTitle};
use crate::markers::normalize_category;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed category store
///
/// Thread-safe via internal mutex on the connection. The engine only ever
/// reads; the write helpers exist for hosts and tooling that populate the
/// relation.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS page (
                page_id INTEGER PRIMARY KEY,
                page_namespace INTEGER NOT NULL DEFAULT 0,
                page_title TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_page_name_title
                ON page(page_namespace, page_title);

            -- cl_from: item id, cl_to: normalized category name
            CREATE TABLE IF NOT EXISTS categorylinks (
                cl_from INTEGER NOT NULL,
                cl_to TEXT NOT NULL,
                PRIMARY KEY (cl_from, cl_to)
            );

            CREATE INDEX IF NOT EXISTS idx_categorylinks_to
                ON categorylinks(cl_to, cl_from);
            "#,
        )?;

        // Readers must not block the host's writer. In-memory databases
        // answer "memory" and stay as they are.
        let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Insert or rename a page
    pub fn save_page(&self, page: &PageTitle) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO page (page_id, page_namespace, page_title)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(page_id) DO UPDATE SET
                page_namespace = excluded.page_namespace,
                page_title = excluded.page_title
            "#,
            params![page.id.get(), page.namespace, page.title],
        )?;
        Ok(())
    }

    /// Attach categories to an item. Names are normalized before storage.
    ///
    /// Returns the number of links that did not exist before.
    pub fn add_categories<S: AsRef<str>>(&self, item: ItemId, categories: &[S]) -> StorageResult<usize> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare("INSERT OR IGNORE INTO categorylinks (cl_from, cl_to) VALUES (?1, ?2)")?;
            for category in categories {
                let name = normalize_category(category.as_ref());
                if name.is_empty() {
                    continue;
                }
                inserted += stmt.execute(params![item.get(), name])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Detach a category from an item
    pub fn remove_category(&self, item: ItemId, category: &str) -> StorageResult<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM categorylinks WHERE cl_from = ?1 AND cl_to = ?2",
            params![item.get(), normalize_category(category)],
        )?;
        Ok(rows > 0)
    }
}

/// Read an item id from the first column, reporting non-integer ids as malformed
fn item_id_from_row(row: &Row<'_>) -> StorageResult<ItemId> {
    match row.get::<_, i64>(0) {
        Ok(id) => Ok(ItemId(id)),
        Err(rusqlite::Error::InvalidColumnType(_, _, ty)) => {
            Err(StorageError::Malformed(format!("item id stored as {}", ty)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Most values bound into one `IN (...)` list. Older SQLite builds refuse
/// statements with more than 999 parameters; longer lists are queried in
/// chunks and the results merged.
const MAX_IN_LIST: usize = 500;

/// `?,?,...` with `n` placeholders
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl CategoryStore for SqliteStore {
    fn categories_of(&self, item: ItemId) -> StorageResult<BTreeSet<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT cl_to FROM categorylinks WHERE cl_from = ?1")?;
        let categories = stmt
            .query_map(params![item.get()], |row| row.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(categories)
    }

    fn items_with_category(&self, category: &str) -> StorageResult<BTreeSet<ItemId>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT cl_from FROM categorylinks WHERE cl_to = ?1")?;
        let mut rows = stmt.query(params![category])?;

        let mut items = BTreeSet::new();
        while let Some(row) = rows.next()? {
            items.insert(item_id_from_row(row)?);
        }
        Ok(items)
    }

    fn items_with_category_and_any_of(
        &self,
        category: &str,
        any_of: &BTreeSet<String>,
    ) -> StorageResult<BTreeSet<ItemId>> {
        if any_of.is_empty() {
            return Ok(BTreeSet::new());
        }

        let conn = self.conn()?;
        let any_of: Vec<&str> = any_of.iter().map(String::as_str).collect();
        let mut items = BTreeSet::new();
        for chunk in any_of.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT DISTINCT c1.cl_from
                 FROM categorylinks AS c1
                 JOIN categorylinks AS c2 ON c1.cl_from = c2.cl_from
                 WHERE c1.cl_to = ? AND c2.cl_to IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let bound = std::iter::once(category).chain(chunk.iter().copied());
            let mut rows = stmt.query(params_from_iter(bound))?;
            while let Some(row) = rows.next()? {
                items.insert(item_id_from_row(row)?);
            }
        }
        Ok(items)
    }

    fn items_with_any_of_categories(&self, categories: &[String]) -> StorageResult<BTreeSet<ItemId>> {
        if categories.is_empty() {
            return Ok(BTreeSet::new());
        }

        let conn = self.conn()?;
        let mut items = BTreeSet::new();
        for chunk in categories.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT DISTINCT cl_from FROM categorylinks WHERE cl_to IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(chunk.iter()))?;
            while let Some(row) = rows.next()? {
                items.insert(item_id_from_row(row)?);
            }
        }
        Ok(items)
    }
}

impl TitleResolver for SqliteStore {
    fn resolve(&self, items: &[ItemId]) -> StorageResult<Vec<PageTitle>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.conn()?;
        let mut pages = Vec::with_capacity(items.len());
        for chunk in items.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT page_id, page_namespace, page_title FROM page WHERE page_id IN ({})",
                placeholders(chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(chunk.iter().map(ItemId::get)))?;
            while let Some(row) = rows.next()? {
                let id = item_id_from_row(row)?;
                pages.push(PageTitle::new(id, row.get(1)?, row.get::<_, String>(2)?));
            }
        }

        // Keep the caller's order rather than the table's
        pages.sort_by_key(|page| items.iter().position(|id| *id == page.id));
        Ok(pages)
    }
}
