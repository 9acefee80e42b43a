//! In-process session store.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{check_range, SessionRecord, SessionStore};
use crate::error::{DatabaseError, Result};

/// Keeps records in memory. Used by tests and by embedders that persist
/// elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<SessionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<SessionRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Records in insertion order.
    pub fn snapshot(&self) -> Vec<SessionRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SessionRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn newest_first(mut records: Vec<SessionRecord>) -> Vec<SessionRecord> {
    records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    records
}

impl SessionStore for MemoryStore {
    fn append(&self, record: &SessionRecord) -> Result<Uuid> {
        self.lock().push(record.clone());
        Ok(record.id)
    }

    fn query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SessionRecord>> {
        check_range(start, end)?;
        let hits = self
            .lock()
            .iter()
            .filter(|r| r.is_work_session && r.start_time >= start && r.start_time <= end)
            .cloned()
            .collect();
        Ok(newest_first(hits))
    }

    fn query_all(&self) -> Result<Vec<SessionRecord>> {
        Ok(newest_first(self.snapshot()))
    }

    fn update_memo(&self, id: Uuid, memo: &str) -> Result<()> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DatabaseError::NotFound(id.to_string()))?;
        record.memo = Some(memo.to_string());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(DatabaseError::NotFound(id.to_string()).into());
        }
        Ok(())
    }

    fn delete_all(&self) -> Result<()> {
        self.lock().clear();
        Ok(())
    }
}
