//! In-memory ObjectStore with fault injection
//!
//! Simulates a cloud bucket with storage classes, plus configurable failure
//! patterns for exercising the migration coordinator's safety ordering
//! without a real provider.
//!
//! # Features
//!
//! - **Per-operation faults**: queue failures for `put`, `get`, `delete`, ...
//! - **Per-key faults**: target a single object within a batch
//! - **Corruption**: silently alter bytes on write or read
//! - **Stalls**: hold a call long enough to trip step timeouts
//! - **Call History**: track all operations for assertions
//!
//! # Examples
//!
//! ```rust
//! use strata_storage::object_store::{Fault, MemoryObjectStore, ObjectStore, Operation};
//! use strata_core::Tier;
//! use bytes::Bytes;
//!
//! # async fn example() -> strata_core::CoreResult<()> {
//! let store = MemoryObjectStore::named("aws", "us-east-1");
//! store.inject(Operation::Put, Fault::Transient("503 SlowDown"));
//!
//! // First put fails, second succeeds
//! assert!(store.put("a.bin", Bytes::from("x"), Tier::Hot.storage_class()).await.is_err());
//! assert!(store.put("a.bin", Bytes::from("x"), Tier::Hot.storage_class()).await.is_ok());
//!
//! assert_eq!(store.failed_calls(Operation::Put), 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{ObjectMetadata, ObjectStore, ProviderDescriptor};
use strata_core::{CoreError, CoreResult};

/// Store operation, used to target faults and filter call history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Put,
    Get,
    Head,
    ChangeClass,
    Delete,
    List,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Get => "get",
            Self::Head => "head",
            Self::ChangeClass => "change_class",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Injected behavior for one call.
#[derive(Debug, Clone)]
pub enum Fault {
    /// Transient error (retry-able). Examples: 500, 503, timeout.
    Transient(&'static str),

    /// Permanent error. Examples: 403, 400.
    Permanent(&'static str),

    /// The call succeeds but the bytes written (put) or returned (get) are altered.
    Corrupt,

    /// Sleep before serving the call normally.
    Stall(Duration),

    /// Success (no error).
    Ok,
}

impl Fault {
    fn to_error(&self) -> Option<CoreError> {
        match self {
            Fault::Transient(msg) => Some(CoreError::StorageError(format!("Transient: {}", msg))),
            Fault::Permanent(msg) => Some(CoreError::StorageError(format!("Permanent: {}", msg))),
            _ => None,
        }
    }
}

/// Memory store configuration.
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// Simulated network latency per call (zero disables the sleep).
    pub latency: Duration,

    /// Enable call history tracking.
    pub track_history: bool,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            track_history: true,
        }
    }
}

/// Call history entry.
#[derive(Debug, Clone)]
pub struct CallHistoryEntry {
    /// Operation performed.
    pub operation: Operation,

    /// Object key (empty for list).
    pub key: String,

    /// Whether operation succeeded.
    pub success: bool,

    /// Timestamp of operation.
    pub timestamp: Instant,
}

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    storage_class: String,
    last_modified: DateTime<Utc>,
}

type FaultKey = (Operation, Option<String>);

/// In-memory ObjectStore implementation.
///
/// Cloning is cheap and clones share state, so a test can keep a handle while
/// the registry owns another.
#[derive(Clone)]
pub struct MemoryObjectStore {
    descriptor: ProviderDescriptor,

    /// In-memory bucket, ordered so `list_all` is sorted.
    objects: Arc<RwLock<BTreeMap<String, StoredObject>>>,

    /// Pending faults, consumed in order. Keyed faults win over operation-wide ones.
    faults: Arc<RwLock<HashMap<FaultKey, VecDeque<Fault>>>>,

    config: MemoryStoreConfig,

    call_history: Arc<RwLock<Vec<CallHistoryEntry>>>,
}

impl MemoryObjectStore {
    /// Create a store with default config (no faults).
    pub fn new(descriptor: ProviderDescriptor) -> Self {
        Self::new_with_config(descriptor, MemoryStoreConfig::default())
    }

    /// Shorthand for `new(ProviderDescriptor::new(name, region))`.
    pub fn named(name: &str, region: &str) -> Self {
        Self::new(ProviderDescriptor::new(name, region))
    }

    /// Create a store with custom config.
    pub fn new_with_config(descriptor: ProviderDescriptor, config: MemoryStoreConfig) -> Self {
        Self {
            descriptor,
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            faults: Arc::new(RwLock::new(HashMap::new())),
            config,
            call_history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a store with intermittent put/get failures (flaky network).
    ///
    /// Generates a random sequence of 100 outcomes per operation based on
    /// `failure_rate` (0.0-1.0).
    pub fn new_flaky(descriptor: ProviderDescriptor, failure_rate: f64) -> Self {
        use rand::Rng;

        let store = Self::new(descriptor);
        let mut rng = rand::thread_rng();

        for operation in [Operation::Put, Operation::Get] {
            for _ in 0..100 {
                if rng.gen::<f64>() < failure_rate {
                    store.inject(operation, Fault::Transient("timeout"));
                } else {
                    store.inject(operation, Fault::Ok);
                }
            }
        }

        store
    }

    /// Queue a fault for the next call of `operation`, whatever the key.
    pub fn inject(&self, operation: Operation, fault: Fault) {
        self.faults
            .write()
            .entry((operation, None))
            .or_default()
            .push_back(fault);
    }

    /// Queue a fault for the next call of `operation` on `key` only.
    pub fn inject_for_key(&self, operation: Operation, key: &str, fault: Fault) {
        self.faults
            .write()
            .entry((operation, Some(key.to_string())))
            .or_default()
            .push_back(fault);
    }

    /// Make every call of `operation` fail with a permanent error.
    ///
    /// Pre-fills the queue with 1000 identical errors.
    pub fn always_fail(&self, operation: Operation, error: &'static str) {
        let mut faults = self.faults.write();
        let queue = faults.entry((operation, None)).or_default();
        queue.extend(std::iter::repeat(Fault::Permanent(error)).take(1000));
    }

    /// Overwrite the stored bytes of an object in place, keeping its class.
    ///
    /// Returns false when the object does not exist.
    pub fn tamper(&self, key: &str, data: Bytes) -> bool {
        match self.objects.write().get_mut(key) {
            Some(object) => {
                object.data = data;
                true
            }
            None => false,
        }
    }

    /// Get call history for assertions.
    pub fn get_call_history(&self) -> Vec<CallHistoryEntry> {
        self.call_history.read().clone()
    }

    /// Clear call history.
    pub fn clear_history(&self) {
        self.call_history.write().clear();
    }

    /// Number of successful calls of an operation.
    pub fn successful_calls(&self, operation: Operation) -> usize {
        self.call_history
            .read()
            .iter()
            .filter(|entry| entry.operation == operation && entry.success)
            .count()
    }

    /// Number of failed calls of an operation.
    pub fn failed_calls(&self, operation: Operation) -> usize {
        self.call_history
            .read()
            .iter()
            .filter(|entry| entry.operation == operation && !entry.success)
            .count()
    }

    /// Get current storage size (number of objects).
    pub fn storage_size(&self) -> usize {
        self.objects.read().len()
    }

    /// Check if key exists in storage.
    pub fn contains_key(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    /// Native class of a stored object, bypassing faults and history.
    pub fn storage_class_of(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .get(key)
            .map(|object| object.storage_class.clone())
    }

    /// Reset storage, pending faults and history.
    pub fn reset(&self) {
        self.objects.write().clear();
        self.faults.write().clear();
        self.call_history.write().clear();
    }

    fn next_fault(&self, operation: Operation, key: &str) -> Option<Fault> {
        let mut faults = self.faults.write();
        if let Some(queue) = faults.get_mut(&(operation, Some(key.to_string()))) {
            if let Some(fault) = queue.pop_front() {
                return Some(fault);
            }
        }
        faults
            .get_mut(&(operation, None))
            .and_then(|queue| queue.pop_front())
    }

    /// Apply latency and the next fault; returns whether the payload should be corrupted.
    async fn before_call(&self, operation: Operation, key: &str) -> CoreResult<bool> {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        match self.next_fault(operation, key) {
            Some(Fault::Stall(duration)) => {
                tokio::time::sleep(duration).await;
                Ok(false)
            }
            Some(Fault::Corrupt) => Ok(true),
            Some(fault) => match fault.to_error() {
                Some(error) => {
                    self.record_call(operation, key, false);
                    Err(error)
                }
                None => Ok(false),
            },
            None => Ok(false),
        }
    }

    fn record_call(&self, operation: Operation, key: &str, success: bool) {
        if self.config.track_history {
            self.call_history.write().push(CallHistoryEntry {
                operation,
                key: key.to_string(),
                success,
                timestamp: Instant::now(),
            });
        }
    }

    fn not_found(&self, operation: Operation, key: &str) -> CoreError {
        self.record_call(operation, key, false);
        CoreError::not_found("object", key)
    }
}

fn corrupt(data: &Bytes) -> Bytes {
    let mut altered = data.to_vec();
    match altered.last_mut() {
        Some(byte) => *byte ^= 0xFF,
        None => altered.push(0xFF),
    }
    Bytes::from(altered)
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    async fn put(&self, key: &str, data: Bytes, storage_class: &str) -> CoreResult<()> {
        if key.is_empty() {
            return Err(CoreError::ValidationError("Key cannot be empty".to_string()));
        }

        let corrupted = self.before_call(Operation::Put, key).await?;
        let data = if corrupted { corrupt(&data) } else { data };

        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                data,
                storage_class: storage_class.to_string(),
                last_modified: Utc::now(),
            },
        );
        self.record_call(Operation::Put, key, true);

        Ok(())
    }

    async fn get(&self, key: &str) -> CoreResult<Bytes> {
        let corrupted = self.before_call(Operation::Get, key).await?;

        let data = self.objects.read().get(key).map(|object| object.data.clone());
        match data {
            Some(data) => {
                self.record_call(Operation::Get, key, true);
                Ok(if corrupted { corrupt(&data) } else { data })
            }
            None => Err(self.not_found(Operation::Get, key)),
        }
    }

    async fn head(&self, key: &str) -> CoreResult<ObjectMetadata> {
        self.before_call(Operation::Head, key).await?;

        let metadata = self.objects.read().get(key).map(|object| ObjectMetadata {
            key: key.to_string(),
            size_bytes: object.data.len() as u64,
            last_modified: object.last_modified,
            storage_class: Some(object.storage_class.clone()),
            etag: Some(format!("{:x}", md5::compute(object.data.as_ref()))),
        });

        match metadata {
            Some(metadata) => {
                self.record_call(Operation::Head, key, true);
                Ok(metadata)
            }
            None => Err(self.not_found(Operation::Head, key)),
        }
    }

    async fn change_class(&self, key: &str, storage_class: &str) -> CoreResult<()> {
        self.before_call(Operation::ChangeClass, key).await?;

        let changed = match self.objects.write().get_mut(key) {
            Some(object) => {
                object.storage_class = storage_class.to_string();
                object.last_modified = Utc::now();
                true
            }
            None => false,
        };

        if changed {
            self.record_call(Operation::ChangeClass, key, true);
            Ok(())
        } else {
            Err(self.not_found(Operation::ChangeClass, key))
        }
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        self.before_call(Operation::Delete, key).await?;

        self.objects.write().remove(key);
        self.record_call(Operation::Delete, key, true);

        Ok(())
    }

    async fn list_all(&self) -> CoreResult<Vec<String>> {
        self.before_call(Operation::List, "").await?;

        let keys = self.objects.read().keys().cloned().collect();
        self.record_call(Operation::List, "", true);

        Ok(keys)
    }
}
