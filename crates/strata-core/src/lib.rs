//! Core domain types for Strata: tiers, access ledger, configuration and errors.

pub mod config;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod tier;

pub use config::{ClassifierConfig, DriverConfig, MigrationConfig, StrataConfig};
pub use error::{CoreError, CoreResult};
pub use ledger::{AccessLedger, AccessRecord};
pub use tier::{Tier, STORAGE_CLASS_TABLE};
