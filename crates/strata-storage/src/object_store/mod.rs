//! Object Store abstraction over storage providers
//!
//! Provides the minimal capability surface the tiering driver and migration
//! coordinator need from a backend:
//! - In-memory store with fault injection (testing, simulation)
//! - Local filesystem (development)
//!
//! Real cloud backends live outside this crate and implement [`ObjectStore`].

mod local;
mod memory;

pub use local::LocalObjectStore;
pub use memory::{CallHistoryEntry, Fault, MemoryObjectStore, MemoryStoreConfig, Operation};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strata_core::{CoreResult, Tier};

/// Identity of one storage provider instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Provider name, unique within a registry (e.g. `"aws"`)
    pub name: String,
    /// Region the provider's bucket lives in
    pub region: String,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.region)
    }
}

/// Object metadata returned by head operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Object key
    pub key: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Last modification timestamp
    pub last_modified: DateTime<Utc>,
    /// Native storage class as reported by the backend, if any
    pub storage_class: Option<String>,
    /// Entity tag (None for local storage)
    pub etag: Option<String>,
}

impl ObjectMetadata {
    /// Canonical tier of this object (unknown classes resolve to Hot).
    pub fn tier(&self) -> Tier {
        Tier::from_storage_class(self.storage_class.as_deref())
    }
}

/// Object Store trait - S3-like interface with storage classes
///
/// All implementations must be thread-safe (Send + Sync) and support
/// concurrent operations. Keys are UTF-8 strings treated as opaque identifiers.
///
/// # Error Handling
///
/// - `CoreError::NotFound` - Object does not exist (get, head, change_class)
/// - `CoreError::StorageError` - Backend-specific error (network, throttling, ...)
/// - `CoreError::IoError` - I/O error (local filesystem only)
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Identity of the provider behind this store.
    fn descriptor(&self) -> &ProviderDescriptor;

    /// Put object under the given native storage class (overwrites if exists)
    ///
    /// # Errors
    ///
    /// - `CoreError::StorageError` if the write is rejected
    /// - `CoreError::ValidationError` if key is empty
    async fn put(&self, key: &str, data: Bytes, storage_class: &str) -> CoreResult<()>;

    /// Get the complete object content
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if object does not exist
    async fn get(&self, key: &str) -> CoreResult<Bytes>;

    /// Get object metadata without downloading
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if object does not exist
    async fn head(&self, key: &str) -> CoreResult<ObjectMetadata>;

    /// Change the storage class in place (copy-in-place, content unchanged)
    ///
    /// # Errors
    ///
    /// - `CoreError::NotFound` if object does not exist
    /// - `CoreError::StorageError` if the backend rejects the change
    async fn change_class(&self, key: &str, storage_class: &str) -> CoreResult<()>;

    /// Delete object (idempotent)
    async fn delete(&self, key: &str) -> CoreResult<()>;

    /// Snapshot of every key in the store, sorted
    async fn list_all(&self) -> CoreResult<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_metadata_tier_resolution() {
        let mut metadata = ObjectMetadata {
            key: "backup.tar".to_string(),
            size_bytes: 1024,
            last_modified: Utc::now(),
            storage_class: Some(Tier::Cold.storage_class().to_string()),
            etag: None,
        };
        assert_eq!(metadata.tier(), Tier::Cold);

        metadata.storage_class = Some("INTELLIGENT_TIERING".to_string());
        assert_eq!(metadata.tier(), Tier::Hot);

        metadata.storage_class = None;
        assert_eq!(metadata.tier(), Tier::Hot);
    }

    #[test]
    fn test_object_metadata_serialization() {
        let metadata = ObjectMetadata {
            key: "test/file.txt".to_string(),
            size_bytes: 1024,
            last_modified: Utc::now(),
            storage_class: None,
            etag: Some("abc123".to_string()),
        };

        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: ObjectMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.key, metadata.key);
        assert_eq!(deserialized.size_bytes, metadata.size_bytes);
    }

    #[test]
    fn test_provider_display() {
        let provider = ProviderDescriptor::new("gcp", "us-west-1");
        assert_eq!(provider.to_string(), "gcp (us-west-1)");
    }
}
