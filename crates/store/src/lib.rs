//! In-memory storage for answered questionnaires.
//!
//! One store per questionnaire kind, keyed by a caller-chosen identifier
//! (team name, service id). Saving under an existing key replaces the
//! payload but keeps the original creation timestamp. Everything lives in
//! process memory; restarting the process empties the store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use checklist_scoring::{ApplicationSubmission, PipelineSubmission};

/// A stored payload with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord<P> {
    pub key: String,
    pub payload: P,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Thread-safe keyed store. Lookups clone the record so callers never hold
/// the lock.
#[derive(Debug, Default)]
pub struct ResponseStore<P> {
    records: Mutex<HashMap<String, ResponseRecord<P>>>,
}

pub type ApplicationResponseStore = ResponseStore<ApplicationSubmission>;
pub type PipelineResponseStore = ResponseStore<PipelineSubmission>;

impl<P: Clone> ResponseStore<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a record by key. Unknown keys return `None`; that is the
    /// expected miss path, never an error.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ResponseRecord<P>> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        records.get(key).cloned()
    }

    /// Insert or replace the record for `key`, returning the stored copy.
    ///
    /// Upserts keep the original `created_at` and restamp `updated_at`.
    pub fn save(&self, key: impl Into<String>, payload: P) -> ResponseRecord<P> {
        let key = key.into();
        let now = Utc::now();
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let created_at = records
            .get(&key)
            .map_or(now, |existing| existing.created_at);
        let record = ResponseRecord {
            key: key.clone(),
            payload,
            created_at,
            updated_at: now,
        };
        records.insert(key.clone(), record.clone());
        log::debug!("Stored response under key {key}");
        record
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, sorted for stable output.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = records.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}
