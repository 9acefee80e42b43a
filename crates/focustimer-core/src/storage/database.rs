//! SQLite-based session storage.
//!
//! Provides persistent storage for:
//! - Finished focus and break intervals (completed or interrupted)
//! - Key-value store for front-end state (e.g. the CLI's saved timer)

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{check_range, data_dir, SessionRecord, SessionStore};
use crate::error::{DatabaseError, Result};

/// SQLite database for session storage.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open the database at `<data dir>/focustimer.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("focustimer.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.migrate()?;
        Ok(db)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn migrate(&self) -> Result<()> {
        self.conn()
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id              TEXT PRIMARY KEY,
                    title           TEXT NOT NULL DEFAULT '',
                    start_time      TEXT NOT NULL,
                    duration_secs   REAL NOT NULL,
                    is_completed    INTEGER NOT NULL,
                    is_work_session INTEGER NOT NULL,
                    memo            TEXT
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_sessions_start_time ON sessions(start_time);
                CREATE INDEX IF NOT EXISTS idx_sessions_work_start ON sessions(is_work_session, start_time);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .map_err(DatabaseError::from)?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn()
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(DatabaseError::from)?;
        Ok(())
    }

    fn select(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<SessionRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql).map_err(DatabaseError::from)?;
        let rows = stmt
            .query_map(params, read_row)
            .map_err(DatabaseError::from)?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row.map_err(DatabaseError::from)?;
            records.push(raw.into_record()?);
        }
        Ok(records)
    }
}

/// Timestamps are stored fixed-width in UTC so text order is time order.
fn encode_time(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

struct RawRow {
    id: String,
    title: String,
    start_time: String,
    duration_secs: f64,
    is_completed: bool,
    is_work_session: bool,
    memo: Option<String>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: row.get(0)?,
        title: row.get(1)?,
        start_time: row.get(2)?,
        duration_secs: row.get(3)?,
        is_completed: row.get(4)?,
        is_work_session: row.get(5)?,
        memo: row.get(6)?,
    })
}

impl RawRow {
    fn into_record(self) -> Result<SessionRecord> {
        let corrupt = |message: String| DatabaseError::CorruptRow {
            table: "sessions".into(),
            message,
        };
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupt(format!("id {}: {e}", self.id)))?;
        let start_time = DateTime::parse_from_rfc3339(&self.start_time)
            .map_err(|e| corrupt(format!("start_time {}: {e}", self.start_time)))?
            .with_timezone(&Utc);
        Ok(SessionRecord {
            id,
            title: self.title,
            start_time,
            duration_secs: self.duration_secs,
            is_completed: self.is_completed,
            is_work_session: self.is_work_session,
            memo: self.memo,
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, title, start_time, duration_secs, is_completed, is_work_session, memo FROM sessions";

impl SessionStore for Database {
    fn append(&self, record: &SessionRecord) -> Result<Uuid> {
        self.conn()
            .execute(
                "INSERT INTO sessions (id, title, start_time, duration_secs, is_completed, is_work_session, memo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id.to_string(),
                    record.title,
                    encode_time(&record.start_time),
                    record.duration_secs,
                    record.is_completed,
                    record.is_work_session,
                    record.memo,
                ],
            )
            .map_err(DatabaseError::from)?;
        Ok(record.id)
    }

    fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SessionRecord>> {
        check_range(start, end)?;
        let sql = format!(
            "{SELECT_COLUMNS}
             WHERE is_work_session = 1 AND start_time >= ?1 AND start_time <= ?2
             ORDER BY start_time DESC"
        );
        self.select(&sql, params![encode_time(&start), encode_time(&end)])
    }

    fn query_all(&self) -> Result<Vec<SessionRecord>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY start_time DESC");
        self.select(&sql, params![])
    }

    fn update_memo(&self, id: Uuid, memo: &str) -> Result<()> {
        let changed = self
            .conn()
            .execute(
                "UPDATE sessions SET memo = ?1 WHERE id = ?2",
                params![memo, id.to_string()],
            )
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM sessions WHERE id = ?1", params![id.to_string()])
            .map_err(DatabaseError::from)?;
        if changed == 0 {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        self.conn()
            .execute("DELETE FROM sessions", [])
            .map_err(DatabaseError::from)?;
        Ok(())
    }
}
