use serde::{Deserialize, Serialize};

use super::error::{FailureKind, MigrationError};
use crate::object_store::ProviderDescriptor;

/// Per-call switches for a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Re-read the destination and compare SHA-256 checksums before releasing the source
    pub verify_integrity: bool,
    /// Delete the source copy once the destination holds the object
    pub delete_source: bool,
}

impl Default for MigrationOptions {
    /// Verify, then delete the source.
    fn default() -> Self {
        Self::verified_move()
    }
}

impl MigrationOptions {
    /// Checksum-verified move: the source is only deleted after the
    /// destination copy matches.
    pub fn verified_move() -> Self {
        Self {
            verify_integrity: true,
            delete_source: true,
        }
    }

    /// Verified copy; the source is kept.
    pub fn verified_copy() -> Self {
        Self {
            verify_integrity: true,
            delete_source: false,
        }
    }

    /// Move without reading the destination back.
    ///
    /// Faster, but the source is deleted on the strength of a successful
    /// upload alone, so a silently corrupted destination copy is the only copy
    /// left. Every such deletion is logged at warn level.
    pub fn unverified_move() -> Self {
        Self {
            verify_integrity: false,
            delete_source: true,
        }
    }
}

/// Result of one successful migration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationRecord {
    pub object_id: String,
    pub source: ProviderDescriptor,
    pub destination: ProviderDescriptor,
    /// SHA-256 of the source bytes, when verification was requested
    pub source_checksum: Option<String>,
    /// SHA-256 of the bytes read back from the destination, when verified
    pub destination_checksum: Option<String>,
    /// Native class the object was written with at the destination
    pub storage_class: String,
    pub bytes_transferred: u64,
    pub verified: bool,
    pub source_deleted: bool,
    /// Set when the source copy could not be removed; the migration still succeeded
    pub delete_warning: Option<String>,
}

/// One failed item of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub object_id: String,
    pub kind: FailureKind,
    pub message: String,
}

impl From<&MigrationError> for ItemError {
    fn from(err: &MigrationError) -> Self {
        Self {
            object_id: err.object_id().to_string(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Aggregate outcome of `migrate_many`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Items never started because the batch was cancelled
    pub skipped: usize,
    pub cancelled: bool,
    /// Bytes moved by this batch
    pub bytes_migrated: u64,
    /// Failures, in input order
    pub errors: Vec<ItemError>,
    /// Successful moves whose source copy is still present
    pub delete_warnings: Vec<String>,
}

/// Lifetime counters of a coordinator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationStatistics {
    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,
    /// `succeeded / attempted`, 0 when nothing was attempted
    pub success_rate: f64,
    pub bytes_migrated: u64,
}
