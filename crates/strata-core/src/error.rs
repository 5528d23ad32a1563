use thiserror::Error;

/// Error returned by object store adapters, the access ledger, the provider
/// registry and configuration checks.
///
/// Migration failures have their own taxonomy in `strata-storage`; adapters
/// only ever speak `CoreError`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Lookup of an object, provider or ledger entry came back empty.
    #[error("no {entity} named `{id}`")]
    NotFound { entity: &'static str, id: String },

    /// Name collision, e.g. registering a provider twice.
    #[error("{entity} `{id}` is already registered")]
    AlreadyExists { entity: &'static str, id: String },

    #[error("operation not allowed: {0}")]
    InvalidState(String),

    /// Local filesystem failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("could not encode: {0}")]
    SerializationError(String),

    #[error("could not decode: {0}")]
    DeserializationError(String),

    /// Backend rejected or failed a call (throttling, permissions, timeouts).
    #[error("backend error: {0}")]
    StorageError(String),

    /// Input or configuration out of bounds.
    #[error("invalid input: {0}")]
    ValidationError(String),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn already_exists(entity: &'static str, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Absence, as opposed to a failed lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
