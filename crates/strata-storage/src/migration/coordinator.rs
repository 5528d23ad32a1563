use futures::{stream, StreamExt};
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::time::Instant;
use strata_core::metrics::{
    MIGRATED_BYTES, MIGRATIONS_TOTAL, MIGRATION_DURATION, SOURCE_DELETE_WARNINGS,
};
use strata_core::{CoreError, CoreResult, MigrationConfig, Tier};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use super::error::MigrationError;
use super::record::{BatchReport, ItemError, MigrationOptions, MigrationRecord, MigrationStatistics};
use crate::object_store::ObjectStore;

/// SHA-256 of `data` as lowercase hex
pub fn checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Default)]
struct Counters {
    attempted: u64,
    succeeded: u64,
    failed: u64,
    bytes_migrated: u64,
}

enum ItemOutcome {
    Skipped,
    Finished(Result<MigrationRecord, MigrationError>),
}

/// Verified object mover between two providers
///
/// A single migration runs these steps in order and stops at the first failure:
/// 1. read the object from the source
/// 2. checksum it (when verifying)
/// 3. read the source storage class (Hot's class if unknown)
/// 4. write it to the destination under the same key and class
/// 5. read it back and compare checksums (when verifying)
/// 6. delete the source (when requested)
///
/// The source is never deleted after a checksum mismatch. A failed source
/// delete does not fail the migration; it is surfaced as
/// [`MigrationRecord::delete_warning`].
///
/// Every adapter call is bounded by `step_timeout`. Lifetime counters are kept
/// per coordinator behind one mutex, and a coordinator-wide semaphore bounds
/// in-flight transfers across concurrent batches.
///
/// # Example
///
/// ```no_run
/// use strata_storage::migration::{MigrationCoordinator, MigrationOptions};
/// use strata_storage::object_store::MemoryObjectStore;
/// use strata_core::MigrationConfig;
///
/// # async fn example() -> strata_core::CoreResult<()> {
/// let aws = MemoryObjectStore::named("aws", "us-east-1");
/// let gcp = MemoryObjectStore::named("gcp", "us-west-1");
/// let coordinator = MigrationCoordinator::new(MigrationConfig::default())?;
///
/// match coordinator
///     .migrate_one("backup.tar", &aws, &gcp, MigrationOptions::verified_move())
///     .await
/// {
///     Ok(record) => println!("moved {} bytes", record.bytes_transferred),
///     Err(e) => eprintln!("{} ({})", e, e.kind()),
/// }
/// # Ok(())
/// # }
/// ```
pub struct MigrationCoordinator {
    config: MigrationConfig,
    counters: Mutex<Counters>,
    permits: Semaphore,
}

impl MigrationCoordinator {
    /// Create new coordinator
    ///
    /// # Errors
    ///
    /// Returns error if config validation fails
    pub fn new(config: MigrationConfig) -> CoreResult<Self> {
        config.validate().map_err(CoreError::ValidationError)?;

        let permits = Semaphore::new(config.max_concurrency);
        Ok(Self {
            config,
            counters: Mutex::new(Counters::default()),
            permits,
        })
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Move one object from `source` to `destination`.
    pub async fn migrate_one(
        &self,
        object_id: &str,
        source: &dyn ObjectStore,
        destination: &dyn ObjectStore,
        options: MigrationOptions,
    ) -> Result<MigrationRecord, MigrationError> {
        self.migrate_one_cancellable(object_id, source, destination, options, &CancellationToken::new())
            .await
    }

    /// Move one object, observing `cancel` before the upload and before the
    /// source is deleted.
    ///
    /// A cancellation seen before the upload leaves both sides untouched. A
    /// cancellation seen after an unverified upload keeps the source. Once the
    /// destination copy has been verified the move completes regardless.
    pub async fn migrate_one_cancellable(
        &self,
        object_id: &str,
        source: &dyn ObjectStore,
        destination: &dyn ObjectStore,
        options: MigrationOptions,
        cancel: &CancellationToken,
    ) -> Result<MigrationRecord, MigrationError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| MigrationError::Cancelled {
                object_id: object_id.to_string(),
            })?;

        self.counters.lock().attempted += 1;
        let start = Instant::now();

        let result = self
            .transfer(object_id, source, destination, options, cancel)
            .await;

        MIGRATION_DURATION.observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(record) => {
                {
                    let mut counters = self.counters.lock();
                    counters.succeeded += 1;
                    counters.bytes_migrated += record.bytes_transferred;
                }
                MIGRATIONS_TOTAL.with_label_values(&["succeeded"]).inc();
                MIGRATED_BYTES.inc_by(record.bytes_transferred);

                tracing::info!(
                    object_id = %object_id,
                    source = %record.source,
                    destination = %record.destination,
                    bytes = record.bytes_transferred,
                    verified = record.verified,
                    source_deleted = record.source_deleted,
                    "Migration succeeded"
                );
            }
            Err(e) => {
                self.counters.lock().failed += 1;
                MIGRATIONS_TOTAL.with_label_values(&[e.kind().as_str()]).inc();

                tracing::warn!(
                    object_id = %object_id,
                    source = %source.descriptor(),
                    destination = %destination.descriptor(),
                    kind = %e.kind(),
                    error = %e,
                    "Migration failed"
                );
            }
        }

        result
    }

    async fn transfer(
        &self,
        object_id: &str,
        source: &dyn ObjectStore,
        destination: &dyn ObjectStore,
        options: MigrationOptions,
        cancel: &CancellationToken,
    ) -> Result<MigrationRecord, MigrationError> {
        let src = source.descriptor();
        let dst = destination.descriptor();

        if src == dst {
            // Same provider: the bytes are already where they need to be.
            let metadata = self
                .bounded(source.head(object_id))
                .await
                .map_err(|e| MigrationError::from_source_read(object_id, &src.name, e))?;
            tracing::debug!(object_id = %object_id, provider = %src, "Source and destination coincide");
            return Ok(MigrationRecord {
                object_id: object_id.to_string(),
                source: src.clone(),
                destination: dst.clone(),
                source_checksum: None,
                destination_checksum: None,
                storage_class: metadata
                    .storage_class
                    .unwrap_or_else(|| Tier::Hot.storage_class().to_string()),
                bytes_transferred: 0,
                verified: false,
                source_deleted: false,
                delete_warning: None,
            });
        }

        tracing::debug!(object_id = %object_id, source = %src, destination = %dst, "Fetching source object");
        let data = self
            .bounded(source.get(object_id))
            .await
            .map_err(|e| MigrationError::from_source_read(object_id, &src.name, e))?;

        let source_checksum = options.verify_integrity.then(|| checksum(&data));

        let storage_class = match self.bounded(source.head(object_id)).await {
            Ok(metadata) => metadata.storage_class,
            Err(e) => {
                tracing::debug!(object_id = %object_id, error = %e, "Source class unavailable, assuming hot");
                None
            }
        }
        .unwrap_or_else(|| Tier::Hot.storage_class().to_string());

        if cancel.is_cancelled() {
            return Err(MigrationError::Cancelled {
                object_id: object_id.to_string(),
            });
        }

        tracing::debug!(
            object_id = %object_id,
            destination = %dst,
            storage_class = %storage_class,
            bytes = data.len(),
            "Uploading to destination"
        );
        self.bounded(destination.put(object_id, data.clone(), &storage_class))
            .await
            .map_err(|e| MigrationError::UploadFailed {
                object_id: object_id.to_string(),
                provider: dst.name.clone(),
                reason: e.to_string(),
            })?;

        let mut destination_checksum = None;
        if let Some(expected) = &source_checksum {
            let readback = self.bounded(destination.get(object_id)).await.map_err(|e| {
                MigrationError::VerificationReadFailed {
                    object_id: object_id.to_string(),
                    provider: dst.name.clone(),
                    reason: e.to_string(),
                }
            })?;

            let actual = checksum(&readback);
            if &actual != expected {
                tracing::error!(
                    object_id = %object_id,
                    source = %src,
                    destination = %dst,
                    source_checksum = %expected,
                    destination_checksum = %actual,
                    "Checksum mismatch, source copy preserved"
                );
                return Err(MigrationError::IntegrityMismatch {
                    object_id: object_id.to_string(),
                    source_checksum: expected.clone(),
                    destination_checksum: actual,
                });
            }

            tracing::debug!(object_id = %object_id, checksum = %actual, "Destination copy verified");
            destination_checksum = Some(actual);
        }

        let verified = destination_checksum.is_some();
        let mut source_deleted = false;
        let mut delete_warning = None;

        if options.delete_source {
            if !verified && cancel.is_cancelled() {
                return Err(MigrationError::Cancelled {
                    object_id: object_id.to_string(),
                });
            }

            if !verified {
                tracing::warn!(
                    object_id = %object_id,
                    source = %src,
                    "Deleting source without integrity verification"
                );
            }

            match self.bounded(source.delete(object_id)).await {
                Ok(()) => source_deleted = true,
                Err(e) => {
                    SOURCE_DELETE_WARNINGS.inc();
                    tracing::warn!(
                        object_id = %object_id,
                        source = %src,
                        error = %e,
                        "Could not delete source copy, migration still successful"
                    );
                    delete_warning = Some(e.to_string());
                }
            }
        }

        Ok(MigrationRecord {
            object_id: object_id.to_string(),
            source: src.clone(),
            destination: dst.clone(),
            source_checksum,
            destination_checksum,
            storage_class,
            bytes_transferred: data.len() as u64,
            verified,
            source_deleted,
            delete_warning,
        })
    }

    /// Move many objects with per-item isolation.
    ///
    /// Up to `max_concurrency` items run at once. `cancel` is checked before
    /// each item starts; items not started are counted as skipped. Lifetime
    /// counters keep accumulating across batches.
    pub async fn migrate_many<I, S>(
        &self,
        object_ids: I,
        source: &dyn ObjectStore,
        destination: &dyn ObjectStore,
        options: MigrationOptions,
        cancel: &CancellationToken,
    ) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let object_ids: Vec<String> = object_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();

        tracing::info!(
            objects = object_ids.len(),
            source = %source.descriptor(),
            destination = %destination.descriptor(),
            "Starting batch migration"
        );

        let mut outcomes: Vec<(usize, ItemOutcome)> = stream::iter(object_ids.iter().enumerate())
            .map(|(index, object_id)| async move {
                if cancel.is_cancelled() {
                    return (index, ItemOutcome::Skipped);
                }
                let result = self
                    .migrate_one_cancellable(object_id, source, destination, options, cancel)
                    .await;
                (index, ItemOutcome::Finished(result))
            })
            .buffer_unordered(self.config.max_concurrency)
            .collect()
            .await;
        outcomes.sort_by_key(|(index, _)| *index);

        let mut report = BatchReport {
            total: object_ids.len(),
            ..BatchReport::default()
        };

        for (_, outcome) in outcomes {
            match outcome {
                ItemOutcome::Skipped => report.skipped += 1,
                ItemOutcome::Finished(Ok(record)) => {
                    report.succeeded += 1;
                    report.bytes_migrated += record.bytes_transferred;
                    if record.delete_warning.is_some() {
                        report.delete_warnings.push(record.object_id);
                    }
                }
                ItemOutcome::Finished(Err(e)) => {
                    report.failed += 1;
                    report.errors.push(ItemError::from(&e));
                }
            }
        }
        report.cancelled = cancel.is_cancelled();

        tracing::info!(
            total = report.total,
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            bytes = report.bytes_migrated,
            "Batch migration complete"
        );

        report
    }

    /// Lifetime statistics of this coordinator
    pub fn statistics(&self) -> MigrationStatistics {
        let counters = self.counters.lock();
        let success_rate = if counters.attempted == 0 {
            0.0
        } else {
            counters.succeeded as f64 / counters.attempted as f64
        };

        MigrationStatistics {
            attempted: counters.attempted,
            succeeded: counters.succeeded,
            failed: counters.failed,
            success_rate,
            bytes_migrated: counters.bytes_migrated,
        }
    }

    /// Run one adapter call under the step timeout.
    async fn bounded<T>(&self, call: impl Future<Output = CoreResult<T>>) -> CoreResult<T> {
        let timeout = self.config.step_timeout();
        tokio::time::timeout(timeout, call)
            .await
            .unwrap_or_else(|_| Err(CoreError::StorageError(format!("timed out after {timeout:?}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::FailureKind;
    use crate::object_store::{Fault, MemoryObjectStore, Operation};
    use bytes::Bytes;
    use std::time::Duration;

    fn providers() -> (MemoryObjectStore, MemoryObjectStore) {
        (
            MemoryObjectStore::named("aws", "us-east-1"),
            MemoryObjectStore::named("gcp", "us-west-1"),
        )
    }

    fn coordinator() -> MigrationCoordinator {
        MigrationCoordinator::new(MigrationConfig::default()).unwrap()
    }

    async fn seed(store: &MemoryObjectStore, key: &str, data: &str, tier: Tier) {
        store
            .put(key, Bytes::from(data.to_string()), tier.storage_class())
            .await
            .unwrap();
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        assert_eq!(
            checksum(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_verified_move() {
        let (aws, gcp) = providers();
        seed(&aws, "backup.tar", "payload", Tier::Cold).await;
        let coordinator = coordinator();

        let record = coordinator
            .migrate_one("backup.tar", &aws, &gcp, MigrationOptions::verified_move())
            .await
            .unwrap();

        assert!(record.verified);
        assert!(record.source_deleted);
        assert_eq!(record.source_checksum, record.destination_checksum);
        assert_eq!(record.bytes_transferred, 7);
        assert_eq!(record.storage_class, Tier::Cold.storage_class());
        assert!(!aws.contains_key("backup.tar"));
        assert_eq!(gcp.storage_class_of("backup.tar").as_deref(), Some(Tier::Cold.storage_class()));
    }

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let (aws, gcp) = providers();
        let coordinator = coordinator();

        let err = coordinator
            .migrate_one("ghost", &aws, &gcp, MigrationOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(gcp.successful_calls(Operation::Put), 0);
        assert_eq!(coordinator.statistics().failed, 1);
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_source() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "a", Tier::Hot).await;
        gcp.inject(Operation::Put, Fault::Permanent("403 Forbidden"));

        let err = coordinator()
            .migrate_one("a.bin", &aws, &gcp, MigrationOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::UploadFailed);
        assert!(aws.contains_key("a.bin"));
    }

    #[tokio::test]
    async fn test_corrupted_destination_keeps_source() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "important", Tier::Warm).await;
        gcp.inject(Operation::Put, Fault::Corrupt);

        let err = coordinator()
            .migrate_one("a.bin", &aws, &gcp, MigrationOptions::verified_move())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::IntegrityMismatch);
        assert!(aws.contains_key("a.bin"));
        assert_eq!(aws.successful_calls(Operation::Delete), 0);
    }

    #[tokio::test]
    async fn test_verification_read_failure() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "a", Tier::Hot).await;
        gcp.inject(Operation::Get, Fault::Transient("503"));

        let err = coordinator()
            .migrate_one("a.bin", &aws, &gcp, MigrationOptions::verified_move())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::VerificationReadFailed);
        assert!(aws.contains_key("a.bin"));
    }

    #[tokio::test]
    async fn test_delete_failure_is_warning() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "abc", Tier::Hot).await;
        aws.inject(Operation::Delete, Fault::Permanent("409 Conflict"));
        let coordinator = coordinator();

        let record = coordinator
            .migrate_one("a.bin", &aws, &gcp, MigrationOptions::verified_move())
            .await
            .unwrap();

        assert!(!record.source_deleted);
        assert!(record.delete_warning.unwrap().contains("409"));
        assert!(aws.contains_key("a.bin"));
        assert!(gcp.contains_key("a.bin"));
        assert_eq!(coordinator.statistics().succeeded, 1);
    }

    #[tokio::test]
    async fn test_unverified_move_skips_readback() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "abc", Tier::Hot).await;

        let record = coordinator()
            .migrate_one("a.bin", &aws, &gcp, MigrationOptions::unverified_move())
            .await
            .unwrap();

        assert!(!record.verified);
        assert!(record.source_checksum.is_none());
        assert!(record.source_deleted);
        assert_eq!(gcp.successful_calls(Operation::Get), 0);
    }

    #[tokio::test]
    async fn test_unknown_source_class_defaults_to_hot() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "abc", Tier::Archive).await;
        aws.inject(Operation::Head, Fault::Permanent("500"));

        let record = coordinator()
            .migrate_one("a.bin", &aws, &gcp, MigrationOptions::verified_copy())
            .await
            .unwrap();

        assert_eq!(record.storage_class, Tier::Hot.storage_class());
        assert!(aws.contains_key("a.bin"));
    }

    #[tokio::test]
    async fn test_step_timeout() {
        let (aws, gcp) = providers();
        seed(&aws, "slow.bin", "abc", Tier::Hot).await;
        gcp.inject(Operation::Put, Fault::Stall(Duration::from_secs(10)));

        let coordinator = MigrationCoordinator::new(MigrationConfig {
            step_timeout_ms: 50,
            ..MigrationConfig::default()
        })
        .unwrap();

        let err = coordinator
            .migrate_one("slow.bin", &aws, &gcp, MigrationOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::UploadFailed);
        assert!(err.to_string().contains("timed out"));
        assert!(aws.contains_key("slow.bin"));
    }

    #[tokio::test]
    async fn test_cancelled_before_upload() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "abc", Tier::Hot).await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = coordinator()
            .migrate_one_cancellable("a.bin", &aws, &gcp, MigrationOptions::unverified_move(), &cancel)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Cancelled);
        assert!(aws.contains_key("a.bin"));
        assert!(!gcp.contains_key("a.bin"));
    }

    #[tokio::test]
    async fn test_cancelled_during_unverified_upload_keeps_source() {
        let (aws, gcp) = providers();
        seed(&aws, "a.bin", "abc", Tier::Hot).await;
        gcp.inject(Operation::Put, Fault::Stall(Duration::from_millis(200)));

        let coordinator = coordinator();
        let cancel = CancellationToken::new();
        let (result, ()) = tokio::join!(
            coordinator.migrate_one_cancellable(
                "a.bin",
                &aws,
                &gcp,
                MigrationOptions::unverified_move(),
                &cancel,
            ),
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                cancel.cancel();
            }
        );

        assert_eq!(result.unwrap_err().kind(), FailureKind::Cancelled);
        assert!(aws.contains_key("a.bin"));
        assert!(gcp.contains_key("a.bin"));
        assert_eq!(aws.successful_calls(Operation::Delete), 0);
    }

    #[tokio::test]
    async fn test_batch_cancelled_midway() {
        let (aws, gcp) = providers();
        let ids: Vec<String> = (0..5).map(|i| format!("obj-{i}")).collect();
        for id in &ids {
            seed(&aws, id, "payload", Tier::Cold).await;
        }
        gcp.inject_for_key(Operation::Put, "obj-1", Fault::Stall(Duration::from_millis(200)));

        let coordinator = MigrationCoordinator::new(MigrationConfig {
            max_concurrency: 1,
            ..MigrationConfig::default()
        })
        .unwrap();
        let cancel = CancellationToken::new();
        let (report, ()) = tokio::join!(
            coordinator.migrate_many(&ids, &aws, &gcp, MigrationOptions::verified_move(), &cancel),
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                cancel.cancel();
            }
        );

        assert!(report.cancelled);
        assert!(report.skipped > 0);
        assert_eq!(report.succeeded + report.failed + report.skipped, report.total);
        // obj-1 was verified before the token was observed, so its move completes
        assert!(gcp.contains_key("obj-1"));
        assert!(!aws.contains_key("obj-1"));
        for id in &ids[2..] {
            assert!(aws.contains_key(id));
            assert!(!gcp.contains_key(id));
        }
    }

    #[tokio::test]
    async fn test_same_provider_is_noop() {
        let aws = MemoryObjectStore::named("aws", "us-east-1");
        seed(&aws, "a.bin", "abc", Tier::Warm).await;

        let record = coordinator()
            .migrate_one("a.bin", &aws, &aws, MigrationOptions::verified_move())
            .await
            .unwrap();

        assert_eq!(record.bytes_transferred, 0);
        assert!(!record.source_deleted);
        assert!(aws.contains_key("a.bin"));
    }

    #[tokio::test]
    async fn test_statistics() {
        let (aws, gcp) = providers();
        let coordinator = coordinator();
        assert_eq!(coordinator.statistics().success_rate, 0.0);

        seed(&aws, "a", "1234", Tier::Hot).await;
        seed(&aws, "b", "56", Tier::Hot).await;
        for id in ["a", "b", "missing", "also-missing"] {
            let _ = coordinator
                .migrate_one(id, &aws, &gcp, MigrationOptions::default())
                .await;
        }

        let stats = coordinator.statistics();
        assert_eq!(stats.attempted, 4);
        assert_eq!(stats.succeeded, 2);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.bytes_migrated, 6);
        assert!((stats.success_rate - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_batch_isolates_failures() {
        let (aws, gcp) = providers();
        seed(&aws, "one", "1", Tier::Cold).await;
        seed(&aws, "three", "333", Tier::Archive).await;
        let coordinator = coordinator();

        let report = coordinator
            .migrate_many(
                ["one", "two", "three"],
                &aws,
                &gcp,
                MigrationOptions::default(),
                &CancellationToken::new(),
            )
            .await;

        assert_eq!(report.total, 3);
        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.skipped, 0);
        assert!(!report.cancelled);
        assert_eq!(report.bytes_migrated, 4);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].object_id, "two");
        assert_eq!(report.errors[0].kind, FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_batch_cancelled_up_front_skips_everything() {
        let (aws, gcp) = providers();
        seed(&aws, "one", "1", Tier::Hot).await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let coordinator = coordinator();
        let report = coordinator
            .migrate_many(["one", "two"], &aws, &gcp, MigrationOptions::default(), &cancel)
            .await;

        assert!(report.cancelled);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.succeeded + report.failed, 0);
        assert_eq!(coordinator.statistics().attempted, 0);
        assert!(aws.contains_key("one"));
    }
}
