use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};

/// Access metadata for one stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Number of recorded accesses since first observation or last reset
    pub access_count: u64,
    /// First time the object was observed; never changes afterwards
    pub created_at: DateTime<Utc>,
    /// Most recent access, always >= `created_at`
    pub last_accessed_at: DateTime<Utc>,
}

impl AccessRecord {
    /// Fresh record for an object first seen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            access_count: 0,
            created_at: now,
            last_accessed_at: now,
        }
    }

    /// Whole days elapsed since the last access. Future timestamps count as 0.
    #[must_use]
    pub fn days_since_access(&self, now: DateTime<Utc>) -> i64 {
        now.signed_duration_since(self.last_accessed_at)
            .num_days()
            .max(0)
    }

    fn validate(&self) -> CoreResult<()> {
        if self.last_accessed_at < self.created_at {
            return Err(CoreError::ValidationError(format!(
                "last_accessed_at {} precedes created_at {}",
                self.last_accessed_at, self.created_at
            )));
        }
        Ok(())
    }
}

/// In-memory access ledger keyed by object identifier.
///
/// Written by the ingestion path (`observe`) and by access simulation
/// (`record_access`); read by the tier classifier. Persisting it is the
/// caller's business: the ledger serializes to a JSON map via [`snapshot`]
/// and is rebuilt with [`from_records`].
///
/// Entries for objects that no longer exist are tolerated and never pruned.
///
/// [`snapshot`]: AccessLedger::snapshot
/// [`from_records`]: AccessLedger::from_records
#[derive(Debug, Default)]
pub struct AccessLedger {
    entries: RwLock<HashMap<String, AccessRecord>>,
}

impl AccessLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from previously saved records.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ValidationError` if any record has
    /// `last_accessed_at < created_at`.
    pub fn from_records(records: HashMap<String, AccessRecord>) -> CoreResult<Self> {
        for record in records.values() {
            record.validate()?;
        }
        Ok(Self {
            entries: RwLock::new(records),
        })
    }

    /// Register a newly ingested object. Existing entries are left untouched.
    pub fn observe(&self, object_id: &str, now: DateTime<Utc>) -> AccessRecord {
        let mut entries = self.entries.write();
        entries
            .entry(object_id.to_string())
            .or_insert_with(|| AccessRecord::new(now))
            .clone()
    }

    /// Record one access, creating the entry if the object was never observed.
    pub fn record_access(&self, object_id: &str, now: DateTime<Utc>) -> AccessRecord {
        let mut entries = self.entries.write();
        let record = entries
            .entry(object_id.to_string())
            .or_insert_with(|| AccessRecord::new(now));

        record.access_count += 1;
        record.last_accessed_at = now.max(record.created_at);

        tracing::debug!(
            object_id = %object_id,
            access_count = record.access_count,
            "Recorded access"
        );

        record.clone()
    }

    /// Insert or replace a full record (used by ingestion and test fixtures).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ValidationError` if `last_accessed_at < created_at`.
    pub fn insert(&self, object_id: impl Into<String>, record: AccessRecord) -> CoreResult<()> {
        record.validate()?;
        self.entries.write().insert(object_id.into(), record);
        Ok(())
    }

    /// Reset the access count of an object to zero.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the object has no entry.
    pub fn reset(&self, object_id: &str) -> CoreResult<()> {
        let mut entries = self.entries.write();
        let record = entries
            .get_mut(object_id)
            .ok_or_else(|| CoreError::not_found("access record", object_id))?;
        record.access_count = 0;
        Ok(())
    }

    /// Get the record for an object
    pub fn get(&self, object_id: &str) -> Option<AccessRecord> {
        self.entries.read().get(object_id).cloned()
    }

    /// Number of tracked objects
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing has been observed yet
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Point-in-time copy of every record.
    pub fn snapshot(&self) -> HashMap<String, AccessRecord> {
        self.entries.read().clone()
    }

    /// Serialize the ledger as a JSON object keyed by object id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SerializationError` if encoding fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    /// Parse a ledger from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DeserializationError` on malformed input and
    /// `CoreError::ValidationError` on records violating the timestamp order.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let records: HashMap<String, AccessRecord> = serde_json::from_str(json)
            .map_err(|e| CoreError::DeserializationError(e.to_string()))?;
        Self::from_records(records)
    }
}
