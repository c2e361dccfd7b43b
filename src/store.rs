use crate::errors::AppError;
use crate::models::{EntryFields, LogEntry};
use crate::storage::{LOGS_KEY, Storage};
use chrono::{NaiveDate, Utc};
use std::cmp::Ordering;
use tracing::warn;

pub struct EntryStore {
    storage: Storage,
    entries: Vec<LogEntry>,
    last_id: i64,
}

impl EntryStore {
    pub async fn load(storage: Storage) -> EntryStore {
        let mut entries: Vec<LogEntry> = match storage.get(LOGS_KEY).await {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("discarding malformed log history: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        sort_newest_first(&mut entries);
        let last_id = entries.iter().map(|entry| entry.id).max().unwrap_or(0);

        EntryStore {
            storage,
            entries,
            last_id,
        }
    }

    pub async fn add(&mut self, fields: EntryFields) -> Result<LogEntry, AppError> {
        let entry = LogEntry {
            id: self.next_id(),
            date: fields.date,
            weight: fields.weight,
            bodyfat: fields.bodyfat,
        };
        self.entries.push(entry.clone());
        sort_newest_first(&mut self.entries);
        self.persist().await?;
        Ok(entry)
    }

    pub async fn update(&mut self, id: i64, fields: EntryFields) -> Result<Option<LogEntry>, AppError> {
        let Some(slot) = self.entries.iter_mut().find(|entry| entry.id == id) else {
            return Ok(None);
        };
        *slot = LogEntry {
            id,
            date: fields.date,
            weight: fields.weight,
            bodyfat: fields.bodyfat,
        };
        let updated = slot.clone();
        sort_newest_first(&mut self.entries);
        self.persist().await?;
        Ok(Some(updated))
    }

    pub async fn delete(&mut self, id: i64) -> Result<bool, AppError> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        self.persist().await?;
        Ok(removed)
    }

    // Re-runs the startup load against the same storage, dropping anything
    // that only lived in memory.
    pub async fn reload(&mut self) {
        *self = EntryStore::load(self.storage.clone()).await;
    }

    pub fn all(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&LogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    // Timestamp-flavoured ids that cannot collide: two entries created within
    // the same millisecond still get distinct, strictly increasing ids.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    async fn persist(&self) -> Result<(), AppError> {
        let payload = serde_json::to_string(&self.entries).map_err(AppError::internal)?;
        self.storage.set(LOGS_KEY, payload).await
    }
}

// Newest parsable date first. Dates that do not parse as %Y-%m-%d sort after
// every parsable one; the sort is stable, so ties keep their relative order.
fn sort_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
