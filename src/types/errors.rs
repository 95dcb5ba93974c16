use thiserror::Error;

// === AuthError ===

/// Errors related to establishing an identity session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Anonymous sign-in is turned off in the configuration.
    #[error("Anonymous sign-in is disabled")]
    AnonymousDisabled,
    /// The identity provider rejected the sign-in.
    #[error("Sign-in failed: {0}")]
    SignInFailed(String),
}

// === ClipboardError ===

/// Errors reading the system clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The user or platform refused clipboard access.
    #[error("Clipboard permission denied: {0}")]
    PermissionDenied(String),
    /// No clipboard is available on this platform.
    #[error("Clipboard is not supported")]
    Unsupported,
}

// === ValidationError ===

/// Errors raised by form validation before anything is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// The url field is not of the form `scheme://rest`.
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}

// === StoreError ===

/// Errors returned by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// Database operation failed.
    #[error("Store database error: {0}")]
    DatabaseError(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

// === BoardError ===

/// Errors surfaced by `RecordBoard` operations.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The record is not present in the current snapshot.
    #[error("Record not found: {0}")]
    RecordNotFound(String),
    /// Permanent deletion is only allowed from the trash.
    #[error("Record is not archived: {0}")]
    NotArchived(String),
    /// The page number lies outside `1..=total_pages`.
    #[error("Page out of range: {0}")]
    PageOutOfRange(usize),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
