//! Access-driven storage tiering
//!
//! Objects are placed in one of four tiers based on how often and how
//! recently they are read, with naming heuristics for well-known kinds of
//! data (logs, backups, reports, scratch files):
//! - **Hot** (`STANDARD`): frequently accessed
//! - **Warm** (`STANDARD_IA`): idle for a month
//! - **Cold** (`GLACIER`): idle for a quarter, backups, yearly data
//! - **Archive** (`DEEP_ARCHIVE`): idle for half a year, logs
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        TieringDriver                         │
//! │                                                              │
//! │  ProviderRegistry ──▶ list_all / head ──▶ current tier       │
//! │  AccessLedger ──────▶ TierClassifier ──▶ target tier         │
//! │                              │                               │
//! │               ┌──────────────┴──────────────┐                │
//! │               │                             │                │
//! │        change_class (in place)   MigrationCoordinator        │
//! │        same provider             (archive provider, Cold+)   │
//! │               │                             │                │
//! │               └──────────────┬──────────────┘                │
//! │                              ▼                               │
//! │                        TieringReport                         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use strata_core::{AccessLedger, StrataConfig};
//! use strata_storage::object_store::MemoryObjectStore;
//! use strata_storage::registry::ProviderRegistry;
//! use strata_storage::tiering::TieringDriver;
//!
//! # async fn example() -> strata_core::CoreResult<()> {
//! let registry = ProviderRegistry::new()
//!     .with(Arc::new(MemoryObjectStore::named("aws", "us-east-1")))?;
//! let driver = TieringDriver::from_config(&StrataConfig::default(), registry)?;
//!
//! let ledger = AccessLedger::new();
//! let report = driver.run_once("aws", &ledger).await?;
//! println!("{} changes, ${:.2}/month", report.changes_performed, report.estimated_monthly_savings);
//! # Ok(())
//! # }
//! ```

mod classifier;
mod driver;
mod report;
mod rules;

pub use classifier::{Classification, DecisionReason, TierClassifier};
pub use driver::TieringDriver;
pub use report::{ObjectAction, ObjectReport, TieringReport};
pub use rules::{default_naming_rules, first_match, NameMatcher, NamingRule};
