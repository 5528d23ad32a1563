//! Central metrics registry and metric definitions
//!
//! Prometheus metrics for the classifier, driver and migration coordinator.
//! Metrics are registered lazily on first access using once_cell::Lazy.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

// ===== Migration Metrics =====

/// Migrations by outcome (`succeeded`, or the failure kind)
pub static MIGRATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "strata_migrations_total",
        "Total number of object migrations by outcome",
        &["outcome"]
    )
    .expect("Failed to register migrations counter")
});

/// Bytes moved by successful migrations
pub static MIGRATED_BYTES: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "strata_migrated_bytes_total",
        "Total bytes moved by successful migrations"
    )
    .expect("Failed to register migrated bytes counter")
});

/// Source copies that could not be removed after a successful migration
pub static SOURCE_DELETE_WARNINGS: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "strata_source_delete_warnings_total",
        "Migrations that succeeded but left the source copy behind"
    )
    .expect("Failed to register delete warning counter")
});

/// Migration duration histogram
pub static MIGRATION_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "strata_migration_duration_seconds",
        "Single object migration duration in seconds",
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0, 120.0]
    )
    .expect("Failed to register migration duration histogram")
});

// ===== Tiering Metrics =====

/// In-place class changes by status (`ok`, `error`)
pub static CLASS_CHANGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "strata_class_changes_total",
        "Total number of in-place storage class changes",
        &["status"]
    )
    .expect("Failed to register class change counter")
});

/// Classifier decisions by target tier
pub static CLASSIFIED_OBJECTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "strata_classified_objects_total",
        "Objects classified by the tiering driver, by target tier",
        &["tier"]
    )
    .expect("Failed to register classification counter")
});

/// Export all registered metrics in Prometheus text format
pub fn export_prometheus() -> String {
    use prometheus::Encoder;

    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
