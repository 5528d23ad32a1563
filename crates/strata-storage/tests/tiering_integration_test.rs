//! Driver runs over registered providers, including the archive path.

use bytes::Bytes;
use chrono::{Duration, Utc};
use std::sync::Arc;
use strata_core::{AccessLedger, AccessRecord, DriverConfig, StrataConfig, Tier};
use strata_storage::object_store::{LocalObjectStore, MemoryObjectStore, ObjectStore, ProviderDescriptor};
use strata_storage::registry::ProviderRegistry;
use strata_storage::tiering::{ObjectAction, TieringDriver};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[tokio::test]
async fn driver_over_local_provider() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let local = Arc::new(
        LocalObjectStore::new(ProviderDescriptor::new("local", "on-prem"), dir.path())
            .await
            .unwrap(),
    );
    for key in ["app/logs/2024-01-01.txt", "images/logo.png", "exports/data.csv"] {
        local
            .put(key, Bytes::from(key.to_string()), Tier::Hot.storage_class())
            .await
            .unwrap();
    }

    let now = Utc::now();
    let ledger = AccessLedger::new();
    for _ in 0..15 {
        ledger.record_access("images/logo.png", now);
    }
    ledger
        .insert(
            "exports/data.csv",
            AccessRecord {
                access_count: 2,
                created_at: now - Duration::days(120),
                last_accessed_at: now - Duration::days(40),
            },
        )
        .unwrap();

    let registry = ProviderRegistry::new().with(local.clone()).unwrap();
    let driver = TieringDriver::from_config(&StrataConfig::default(), registry).unwrap();

    let report = driver.run_once_at("local", &ledger, now).await.unwrap();

    assert_eq!(report.objects_analyzed, 3);
    assert_eq!(report.changes_performed, 2);
    assert_eq!(report.cost_optimizations, 1);
    assert_eq!(report.archive_candidates, vec!["app/logs/2024-01-01.txt".to_string()]);
    assert_eq!(
        local.head("app/logs/2024-01-01.txt").await.unwrap().tier(),
        Tier::Archive
    );
    assert_eq!(local.head("exports/data.csv").await.unwrap().tier(), Tier::Warm);
    assert_eq!(local.head("images/logo.png").await.unwrap().tier(), Tier::Hot);

    let again = driver.run_once_at("local", &ledger, now).await.unwrap();
    assert_eq!(again.changes_performed, 0);
    assert_eq!(again.already_optimal, 3);
}

#[tokio::test]
async fn archive_provider_receives_cold_data() {
    init_tracing();
    let aws = MemoryObjectStore::named("aws", "us-east-1");
    let azure = MemoryObjectStore::named("azure", "eu-west-1");
    for key in ["nightly_backup.bak", "index.html", "audit.log"] {
        aws.put(key, Bytes::from(key.to_string()), Tier::Hot.storage_class())
            .await
            .unwrap();
    }

    let registry = ProviderRegistry::new()
        .with(Arc::new(aws.clone()))
        .unwrap()
        .with(Arc::new(azure.clone()))
        .unwrap();
    let config = StrataConfig {
        driver: DriverConfig {
            archive_provider: Some("azure".into()),
            archive_threshold: Tier::Archive,
            ..DriverConfig::default()
        },
        ..StrataConfig::default()
    };
    let driver = TieringDriver::from_config(&config, registry).unwrap();

    let report = driver.run_once("aws", &AccessLedger::new()).await.unwrap();

    // Cold stays with the scanned provider, Archive moves
    assert_eq!(aws.storage_class_of("nightly_backup.bak").as_deref(), Some(Tier::Cold.storage_class()));
    assert!(!aws.contains_key("audit.log"));
    assert_eq!(azure.storage_class_of("audit.log").as_deref(), Some(Tier::Archive.storage_class()));
    assert_eq!(report.with_action(ObjectAction::Migrated).count(), 1);
    assert_eq!(report.estimated_monthly_savings, 30.0);

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"migrated\""));

    let stats = driver.coordinator().statistics();
    assert_eq!(stats.succeeded, 1);
}
