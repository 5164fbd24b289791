//! Error types for tamween.
//!
//! This module defines all error types used throughout the tamween crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tamween operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to bring the storage schema up to date.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// The persisted collection could not be decoded.
    #[error("stored card data under '{key}' is corrupt: {source}")]
    CorruptStore {
        /// Slot key that holds the collection.
        key: &'static str,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    // === Record Errors ===
    /// A card violates a record invariant and was not saved.
    #[error("invalid card: {message}")]
    Validation {
        /// Which invariant failed.
        message: String,
    },

    /// No card with the given id exists.
    #[error("no card with id '{id}'")]
    CardNotFound {
        /// The id that was looked up.
        id: String,
    },

    // === Import Errors ===
    /// The import file parsed, but its top-level value is not an array.
    #[error("import file must contain a JSON array of cards, found {found}")]
    ImportNotArray {
        /// The JSON kind found instead.
        found: &'static str,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for tamween operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a card-not-found error.
    #[must_use]
    pub fn card_not_found(id: impl Into<String>) -> Self {
        Self::CardNotFound { id: id.into() }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error is a rejected record.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error means the stored collection is unreadable.
    #[must_use]
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, Self::CorruptStore { .. })
    }

    /// Check if this error came from reading an import file.
    #[must_use]
    pub fn is_import_error(&self) -> bool {
        matches!(self, Self::ImportNotArray { .. } | Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = Error::validation("owner name is empty");
        assert_eq!(err.to_string(), "invalid card: owner name is empty");
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_card_not_found_display() {
        let err = Error::card_not_found("abc");
        assert_eq!(err.to_string(), "no card with id 'abc'");
        assert!(!err.is_validation_error());
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_import_not_array_display() {
        let err = Error::ImportNotArray { found: "object" };
        assert!(err.to_string().contains("found object"));
        assert!(err.is_import_error());
    }

    #[test]
    fn test_corrupt_store_display() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::CorruptStore {
            key: "ration_cards_db",
            source,
        };
        assert!(err.to_string().contains("ration_cards_db"));
        assert!(err.is_corrupt_store());
        assert!(!err.is_import_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
            assert!(err.is_import_error());
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "search_limit must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("search_limit"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
