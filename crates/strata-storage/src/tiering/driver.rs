use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use strata_core::metrics::{CLASSIFIED_OBJECTS, CLASS_CHANGES_TOTAL};
use strata_core::{AccessLedger, CoreError, CoreResult, DriverConfig, StrataConfig, Tier};
use tokio_util::sync::CancellationToken;

use super::classifier::TierClassifier;
use super::report::{ObjectAction, ObjectReport, TieringReport};
use crate::migration::{BatchReport, ItemError, MigrationCoordinator, MigrationError, MigrationOptions};
use crate::object_store::ObjectStore;
use crate::registry::ProviderRegistry;

/// Tiering driver
///
/// Walks every object of one provider, asks the classifier for a target tier
/// and applies it with an in-place class change. Objects that end up at or
/// beyond the archive threshold are additionally moved to the configured
/// archive provider through the [`MigrationCoordinator`].
///
/// Per-object failures are recorded in the report and never stop the run.
pub struct TieringDriver {
    registry: ProviderRegistry,
    classifier: TierClassifier,
    coordinator: Arc<MigrationCoordinator>,
    config: DriverConfig,
}

impl TieringDriver {
    /// Create new driver
    ///
    /// # Errors
    ///
    /// Returns error if config validation fails or the archive provider is
    /// not registered
    pub fn new(
        registry: ProviderRegistry,
        classifier: TierClassifier,
        coordinator: Arc<MigrationCoordinator>,
        config: DriverConfig,
    ) -> CoreResult<Self> {
        config.validate().map_err(CoreError::ValidationError)?;
        if let Some(archive) = &config.archive_provider {
            registry.get(archive)?;
        }

        Ok(Self {
            registry,
            classifier,
            coordinator,
            config,
        })
    }

    /// Build classifier, coordinator and driver from one loaded configuration.
    pub fn from_config(config: &StrataConfig, registry: ProviderRegistry) -> CoreResult<Self> {
        let classifier = TierClassifier::new(config.classifier.clone())?;
        let coordinator = Arc::new(MigrationCoordinator::new(config.migration.clone())?);
        Self::new(registry, classifier, coordinator, config.driver.clone())
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    pub fn coordinator(&self) -> &Arc<MigrationCoordinator> {
        &self.coordinator
    }

    /// One pass over `provider` as of now.
    pub async fn run_once(&self, provider: &str, ledger: &AccessLedger) -> CoreResult<TieringReport> {
        self.run_once_at(provider, ledger, Utc::now()).await
    }

    /// One pass over `provider`, classifying against `now`.
    ///
    /// # Errors
    ///
    /// Fails only when `provider` is unknown or its listing fails.
    pub async fn run_once_at(
        &self,
        provider: &str,
        ledger: &AccessLedger,
        now: DateTime<Utc>,
    ) -> CoreResult<TieringReport> {
        let store = self.registry.get(provider)?;
        let archive = self.archive_target(provider)?;

        tracing::info!(provider = %store.descriptor(), "Starting tiering run");
        let start = std::time::Instant::now();

        let ids = self.bounded(store.list_all()).await?;
        let mut report = TieringReport::new(provider, now);

        for id in ids {
            let line = self
                .process_object(&id, store.as_ref(), archive.as_deref(), ledger, now)
                .await;
            report.push(line);
        }

        report.estimated_monthly_savings =
            report.cost_optimizations as f64 * self.config.savings_per_demotion;

        tracing::info!(
            provider = %provider,
            analyzed = report.objects_analyzed,
            changed = report.changes_performed,
            failed = report.failed,
            cost_optimizations = report.cost_optimizations,
            duration_ms = start.elapsed().as_millis() as u64,
            "Tiering run complete"
        );

        Ok(report)
    }

    /// Archive provider for a run over `provider`, if the cross-provider path applies.
    fn archive_target(&self, provider: &str) -> CoreResult<Option<Arc<dyn ObjectStore>>> {
        match self.config.archive_provider.as_deref() {
            Some(archive) if archive != provider => Ok(Some(self.registry.get(archive)?)),
            _ => Ok(None),
        }
    }

    async fn process_object(
        &self,
        id: &str,
        store: &dyn ObjectStore,
        archive: Option<&dyn ObjectStore>,
        ledger: &AccessLedger,
        now: DateTime<Utc>,
    ) -> ObjectReport {
        let metadata = match self.bounded(store.head(id)).await {
            Ok(metadata) => metadata,
            Err(e) => {
                let err = MigrationError::from_source_read(id, &store.descriptor().name, e);
                tracing::warn!(object_id = %id, error = %err, "Could not inspect object");
                return failed_line(id, None, None, &err);
            }
        };

        let current = metadata.tier();
        let record = ledger.get(id);
        let classification = self.classifier.classify_at(id, record.as_ref(), current, now);
        let target = classification.tier;
        CLASSIFIED_OBJECTS.with_label_values(&[target.as_str()]).inc();

        let mut action = ObjectAction::AlreadyOptimal;
        if target != current {
            tracing::info!(
                object_id = %id,
                from = %current,
                to = %target,
                reason = %classification.reason,
                "Changing storage class"
            );

            match self.bounded(store.change_class(id, target.storage_class())).await {
                Ok(()) => {
                    CLASS_CHANGES_TOTAL.with_label_values(&["ok"]).inc();
                    action = ObjectAction::ClassChanged;
                }
                Err(e) => {
                    CLASS_CHANGES_TOTAL.with_label_values(&["error"]).inc();
                    let err = MigrationError::ClassChangeFailed {
                        object_id: id.to_string(),
                        storage_class: target.storage_class().to_string(),
                        reason: e.to_string(),
                    };
                    tracing::error!(object_id = %id, error = %err, "Storage class change failed");
                    return failed_line(id, Some(current), Some(current), &err);
                }
            }
        }

        if let Some(archive) = archive.filter(|_| target >= self.config.archive_threshold) {
            return match self
                .coordinator
                .migrate_one(id, store, archive, MigrationOptions::verified_move())
                .await
            {
                Ok(record) => ObjectReport {
                    id: id.to_string(),
                    previous_tier: Some(current),
                    new_tier: Some(target),
                    action: ObjectAction::Migrated,
                    destination: Some(record.destination.name),
                    error: None,
                },
                Err(err) => failed_line(id, Some(current), Some(target), &err),
            };
        }

        ObjectReport {
            id: id.to_string(),
            previous_tier: Some(current),
            new_tier: Some(target),
            action,
            destination: None,
            error: None,
        }
    }

    /// Move every object at or beyond `threshold` from `source` to
    /// `destination`, verifying each copy and deleting the source.
    ///
    /// Objects that cannot be inspected are left in place and logged.
    ///
    /// # Errors
    ///
    /// Fails when either provider is unknown, when they are the same provider,
    /// or when the source listing fails.
    pub async fn run_cross_provider_migration(
        &self,
        source: &str,
        destination: &str,
        threshold: Tier,
        cancel: &CancellationToken,
    ) -> CoreResult<BatchReport> {
        if source == destination {
            return Err(CoreError::invalid_state(format!(
                "source and destination are both `{source}`"
            )));
        }
        let from = self.registry.get(source)?;
        let to = self.registry.get(destination)?;

        let mut candidates = Vec::new();
        for id in self.bounded(from.list_all()).await? {
            match self.bounded(from.head(&id)).await {
                Ok(metadata) if metadata.tier() >= threshold => candidates.push(id),
                Ok(_) => {}
                Err(e) => tracing::warn!(object_id = %id, error = %e, "Skipping uninspectable object"),
            }
        }

        tracing::info!(
            source = %from.descriptor(),
            destination = %to.descriptor(),
            threshold = %threshold,
            candidates = candidates.len(),
            "Starting cross-provider migration"
        );

        Ok(self
            .coordinator
            .migrate_many(
                &candidates,
                from.as_ref(),
                to.as_ref(),
                MigrationOptions::verified_move(),
                cancel,
            )
            .await)
    }

    async fn bounded<T>(&self, call: impl Future<Output = CoreResult<T>>) -> CoreResult<T> {
        let timeout = self.coordinator.config().step_timeout();
        tokio::time::timeout(timeout, call)
            .await
            .unwrap_or_else(|_| Err(CoreError::StorageError(format!("timed out after {timeout:?}"))))
    }
}

fn failed_line(id: &str, previous: Option<Tier>, new: Option<Tier>, err: &MigrationError) -> ObjectReport {
    ObjectReport {
        id: id.to_string(),
        previous_tier: previous,
        new_tier: new,
        action: ObjectAction::Failed,
        destination: None,
        error: Some(ItemError::from(err)),
    }
}
