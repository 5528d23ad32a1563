//! Verified cross-provider migration
//!
//! The [`MigrationCoordinator`] moves objects between two [`ObjectStore`]s
//! with an optional checksum round-trip before the source is released:
//!
//! ```text
//!   source                    coordinator                    destination
//!     │── get ───────────────────▶│                                │
//!     │                           │ sha256(source bytes)           │
//!     │── head (storage class) ──▶│                                │
//!     │                           │── put (same key, same class) ─▶│
//!     │                           │◀─ get (verification read) ─────│
//!     │                           │ sha256 compare                 │
//!     │◀─ delete ─────────────────│  (only when verified or        │
//!     │                           │   explicitly unverified)       │
//! ```
//!
//! [`ObjectStore`]: crate::object_store::ObjectStore

mod coordinator;
mod error;
mod record;

pub use coordinator::{checksum, MigrationCoordinator};
pub use error::{FailureKind, MigrationError};
pub use record::{BatchReport, ItemError, MigrationOptions, MigrationRecord, MigrationStatistics};
