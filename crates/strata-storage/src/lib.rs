//! Storage side of Strata: object store adapters, the provider registry,
//! the tier classifier and driver, and the verified migration coordinator.

pub mod migration;
pub mod object_store;
pub mod registry;
pub mod tiering;

pub use migration::{
    BatchReport, FailureKind, MigrationCoordinator, MigrationError, MigrationOptions,
    MigrationRecord, MigrationStatistics,
};
pub use object_store::{LocalObjectStore, MemoryObjectStore, ObjectMetadata, ObjectStore, ProviderDescriptor};
pub use registry::ProviderRegistry;
pub use tiering::{TierClassifier, TieringDriver, TieringReport};
