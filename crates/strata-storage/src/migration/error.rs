use serde::{Deserialize, Serialize};
use std::fmt;
use strata_core::CoreError;
use thiserror::Error;

/// Failure taxonomy shared by migrations, batch reports and the tiering driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Object absent at the source
    NotFound,
    /// Source read failed for a reason other than absence
    SourceReadFailed,
    /// Destination write rejected or timed out
    UploadFailed,
    /// Destination unreadable after upload
    VerificationReadFailed,
    /// Source and destination checksums disagree; the source is kept
    IntegrityMismatch,
    /// In-place tier change rejected by the backend
    ClassChangeFailed,
    /// Stopped by cooperative cancellation before the source could be released
    Cancelled,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::SourceReadFailed => "source_read_failed",
            Self::UploadFailed => "upload_failed",
            Self::VerificationReadFailed => "verification_read_failed",
            Self::IntegrityMismatch => "integrity_mismatch",
            Self::ClassChangeFailed => "class_change_failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single object could not be moved
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("object `{object_id}` not found at source {provider}")]
    NotFound { object_id: String, provider: String },

    #[error("reading `{object_id}` from {provider} failed: {reason}")]
    SourceReadFailed {
        object_id: String,
        provider: String,
        reason: String,
    },

    #[error("upload of `{object_id}` to {provider} failed: {reason}")]
    UploadFailed {
        object_id: String,
        provider: String,
        reason: String,
    },

    #[error("verification read of `{object_id}` from {provider} failed: {reason}")]
    VerificationReadFailed {
        object_id: String,
        provider: String,
        reason: String,
    },

    #[error("checksum mismatch for `{object_id}`: source {source_checksum}, destination {destination_checksum}")]
    IntegrityMismatch {
        object_id: String,
        source_checksum: String,
        destination_checksum: String,
    },

    #[error("changing class of `{object_id}` to {storage_class} failed: {reason}")]
    ClassChangeFailed {
        object_id: String,
        storage_class: String,
        reason: String,
    },

    #[error("migration of `{object_id}` cancelled before the source could be released")]
    Cancelled { object_id: String },
}

impl MigrationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::SourceReadFailed { .. } => FailureKind::SourceReadFailed,
            Self::UploadFailed { .. } => FailureKind::UploadFailed,
            Self::VerificationReadFailed { .. } => FailureKind::VerificationReadFailed,
            Self::IntegrityMismatch { .. } => FailureKind::IntegrityMismatch,
            Self::ClassChangeFailed { .. } => FailureKind::ClassChangeFailed,
            Self::Cancelled { .. } => FailureKind::Cancelled,
        }
    }

    pub fn object_id(&self) -> &str {
        match self {
            Self::NotFound { object_id, .. }
            | Self::SourceReadFailed { object_id, .. }
            | Self::UploadFailed { object_id, .. }
            | Self::VerificationReadFailed { object_id, .. }
            | Self::IntegrityMismatch { object_id, .. }
            | Self::ClassChangeFailed { object_id, .. }
            | Self::Cancelled { object_id } => object_id,
        }
    }

    /// Map a failed source read: absence is `NotFound`, anything else `SourceReadFailed`.
    pub(crate) fn from_source_read(object_id: &str, provider: &str, err: CoreError) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                object_id: object_id.to_string(),
                provider: provider.to_string(),
            }
        } else {
            Self::SourceReadFailed {
                object_id: object_id.to_string(),
                provider: provider.to_string(),
                reason: err.to_string(),
            }
        }
    }
}
