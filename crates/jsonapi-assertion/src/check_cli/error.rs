//! Error types for the resource object checker.

use thiserror::Error;

use crate::error::RegistryError;

/// Errors surfaced while loading checker inputs or rendering the report.
///
/// Validation failures are not errors here; they are reported through
/// [`CheckOutcome::Rejected`](super::CheckOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration failure.
        message: String,
    },
    /// A required setting was not supplied.
    #[error("missing required setting: {name}")]
    MissingSetting {
        /// Name of the missing setting.
        name: &'static str,
    },
    /// A configured path is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the path.
        path: String,
    },
    /// An input file could not be read.
    #[error("failed to read '{path}': {message}")]
    Io {
        /// Path to the file.
        path: String,
        /// Description of the I/O error.
        message: String,
    },
    /// The resource object file is not valid JSON.
    #[error("invalid resource object JSON in '{path}': {message}")]
    InvalidPayload {
        /// Path to the resource object file.
        path: String,
        /// Parser error message.
        message: String,
    },
    /// The errors document could not be serialized.
    #[error("failed to render errors document: {message}")]
    Report {
        /// Serializer error message.
        message: String,
    },
    /// The mapping registry could not be loaded.
    #[error("mapping registry error: {source}")]
    Registry {
        /// Underlying registry error.
        #[from]
        #[source]
        source: RegistryError,
    },
}
