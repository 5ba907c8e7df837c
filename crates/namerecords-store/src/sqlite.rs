// ABOUTME: SQLite-backed gateway for the namerecords table.
// ABOUTME: Provides list, get, insert, delete, and partial update operations over a single connection.

use std::path::Path;

use namerecords_core::{NameRecord, NameRecordPatch, NewNameRecord};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("empty update: no namerecords columns supplied for id {0}")]
    EmptyUpdate(i64),
}

const SELECT_COLUMNS: &str = "SELECT id, name, gender, era, recent FROM namerecords";

/// Owns the database connection and translates record operations into SQL.
pub struct NameRecordStore {
    conn: Connection,
}

impl NameRecordStore {
    /// Open the database named by a connection string and ensure the schema exists.
    /// Accepts a file path, an optional `sqlite://` prefix, or `:memory:`.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let target = url.strip_prefix("sqlite://").unwrap_or(url);
        if target == ":memory:" {
            return Self::open_in_memory();
        }

        let conn = Connection::open(Path::new(target))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        tracing::debug!(path = %target, "opened namerecords database");
        Self::init(conn)
    }

    /// Open a private in-memory database. Used by tests and `:memory:` URLs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS namerecords (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                gender TEXT NOT NULL,
                era TEXT NOT NULL,
                recent BOOLEAN
            );",
        )?;
        Ok(Self { conn })
    }

    /// All records, ordered by id.
    pub fn list_all(&self) -> Result<Vec<NameRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;
        let rows = stmt.query_map([], record_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<NameRecord>, StoreError> {
        let record = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Insert a record and return it with its assigned id.
    pub fn insert(&self, record: &NewNameRecord) -> Result<NameRecord, StoreError> {
        let created = self.conn.query_row(
            "INSERT INTO namerecords (name, gender, era, recent)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, gender, era, recent",
            params![record.name, record.gender, record.era, record.recent],
            record_from_row,
        )?;
        Ok(created)
    }

    /// Delete by id, returning the number of rows removed (0 or 1).
    pub fn delete_by_id(&self, id: i64) -> Result<usize, StoreError> {
        let removed = self
            .conn
            .execute("DELETE FROM namerecords WHERE id = ?1", params![id])?;
        Ok(removed)
    }

    /// Apply the `Some` fields of a patch, returning the number of rows affected.
    pub fn update(&self, id: i64, patch: &NameRecordPatch) -> Result<usize, StoreError> {
        let mut columns = Vec::new();
        let mut values = Vec::new();

        if let Some(name) = &patch.name {
            columns.push("name = ?");
            values.push(Value::Text(name.clone()));
        }
        if let Some(gender) = &patch.gender {
            columns.push("gender = ?");
            values.push(Value::Text(gender.clone()));
        }
        if let Some(era) = &patch.era {
            columns.push("era = ?");
            values.push(Value::Text(era.clone()));
        }
        if let Some(recent) = patch.recent {
            columns.push("recent = ?");
            values.push(Value::Integer(i64::from(recent)));
        }

        if columns.is_empty() {
            return Err(StoreError::EmptyUpdate(id));
        }
        values.push(Value::Integer(id));

        let sql = format!("UPDATE namerecords SET {} WHERE id = ?", columns.join(", "));
        let affected = self.conn.execute(&sql, params_from_iter(values))?;
        Ok(affected)
    }

    /// Remove every row. Test fixtures call this between cases.
    pub fn truncate(&self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM namerecords", [])?;
        Ok(())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<NameRecord> {
    Ok(NameRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        gender: row.get(2)?,
        era: row.get(3)?,
        recent: row.get(4)?,
    })
}
