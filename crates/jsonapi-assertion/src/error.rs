//! Error types for the jsonapi-assertion crate.
//!
//! Validation failures are reported as [`ValidationError`] values collected in
//! an [`ErrorBag`]. Each error renders as a JSON:API error object so inbound
//! adapters can return the bag to clients unchanged. Registry loading has its
//! own [`RegistryError`] enum.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// HTTP status reported for every validation error object.
const UNPROCESSABLE_ENTITY: &str = "422";

/// A single validation failure raised while asserting a resource object.
///
/// # Examples
///
/// ```
/// use jsonapi_assertion::ValidationError;
///
/// let err = ValidationError::InvalidAttribute {
///     attribute: "colour".to_owned(),
///     resource_type: "post".to_owned(),
/// };
/// assert_eq!(err.code(), "invalid_attribute");
/// assert_eq!(err.source_pointer(), "/data/attributes/colour");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(into = "ErrorObject")]
pub enum ValidationError {
    /// The resource object is absent, empty, or not a JSON object.
    #[error("Missing `data` member at document's top level.")]
    MissingData,

    /// The resource object has no non-empty string `type` member.
    #[error("Missing `type` member for resource object.")]
    MissingType,

    /// The `type` member does not resolve to the expected resource mapping.
    #[error("Resource type `{resource_type}` is not valid.")]
    InvalidType {
        /// The submitted type name.
        resource_type: String,
    },

    /// The resource object has no non-empty `attributes` object.
    #[error("Missing `attributes` member for resource object.")]
    MissingAttributes,

    /// An attribute key matches no known property spelling.
    #[error("Attribute `{attribute}` for resource of type `{resource_type}` is not valid.")]
    InvalidAttribute {
        /// The unrecognised attribute key.
        attribute: String,
        /// The submitted type name.
        resource_type: String,
    },
}

impl ValidationError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingData => "missing_data",
            Self::MissingType => "missing_type",
            Self::InvalidType { .. } => "invalid_type",
            Self::MissingAttributes => "missing_attributes",
            Self::InvalidAttribute { .. } => "invalid_attribute",
        }
    }

    /// Short human-readable summary of the failure kind.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::MissingData => "Missing Data",
            Self::MissingType => "Missing Type",
            Self::InvalidType { .. } => "Invalid Type",
            Self::MissingAttributes => "Missing Attributes",
            Self::InvalidAttribute { .. } => "Invalid Attribute",
        }
    }

    /// JSON pointer to the offending member of the submitted document.
    #[must_use]
    pub fn source_pointer(&self) -> String {
        match self {
            Self::MissingData => "/data".to_owned(),
            Self::MissingType | Self::InvalidType { .. } => "/data/type".to_owned(),
            Self::MissingAttributes => "/data/attributes".to_owned(),
            Self::InvalidAttribute { attribute, .. } => {
                format!("/data/attributes/{}", escape_pointer_token(attribute))
            }
        }
    }
}

/// Escapes a JSON pointer reference token (RFC 6901).
fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// JSON:API error object wire representation.
#[derive(Debug, Clone, Serialize)]
struct ErrorObject {
    status: &'static str,
    code: &'static str,
    title: &'static str,
    detail: String,
    source: ErrorSource,
}

#[derive(Debug, Clone, Serialize)]
struct ErrorSource {
    pointer: String,
}

impl From<ValidationError> for ErrorObject {
    fn from(value: ValidationError) -> Self {
        Self {
            status: UNPROCESSABLE_ENTITY,
            code: value.code(),
            title: value.title(),
            detail: value.to_string(),
            source: ErrorSource {
                pointer: value.source_pointer(),
            },
        }
    }
}

/// Ordered collection of validation errors.
///
/// An empty bag means the resource object is valid. The bag serializes as a
/// JSON array of error objects; [`ErrorBag::to_document`] wraps it in a
/// top-level `errors` member.
///
/// # Examples
///
/// ```
/// use jsonapi_assertion::{ErrorBag, ValidationError};
///
/// let mut bag = ErrorBag::new();
/// assert!(bag.is_empty());
///
/// bag.push(ValidationError::MissingType);
/// assert_eq!(bag.len(), 1);
/// assert_eq!(bag.as_slice(), &[ValidationError::MissingType]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorBag {
    errors: Vec<ValidationError>,
}

impl ErrorBag {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Appends an error to the end of the bag.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns `true` when no errors have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Recorded errors in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over the recorded errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Wraps the bag in a JSON:API top-level `errors` document.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonapi_assertion::{ErrorBag, ValidationError};
    ///
    /// let bag = ErrorBag::from(ValidationError::MissingData);
    /// let json = serde_json::to_value(bag.to_document()).expect("serializable");
    /// assert_eq!(json["errors"][0]["code"], "missing_data");
    /// assert_eq!(json["errors"][0]["source"]["pointer"], "/data");
    /// ```
    #[must_use]
    pub const fn to_document(&self) -> ErrorDocument<'_> {
        ErrorDocument { errors: self }
    }
}

impl From<ValidationError> for ErrorBag {
    fn from(value: ValidationError) -> Self {
        Self {
            errors: vec![value],
        }
    }
}

impl FromIterator<ValidationError> for ErrorBag {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ValidationError> for ErrorBag {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ErrorBag {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorBag {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ErrorBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.errors.iter();
        match errors.next() {
            None => write!(f, "no validation errors"),
            Some(first) => {
                write!(f, "{first}")?;
                for error in errors {
                    write!(f, "; {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ErrorBag {}

/// Top-level JSON:API document carrying only an `errors` member.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ErrorDocument<'a> {
    errors: &'a ErrorBag,
}

/// Errors that can occur when loading or extending a mapping registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read mapping registry at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: String,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid mapping registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported mapping registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry declares no mappings.
    #[error("mapping registry contains no mappings")]
    EmptyMappings,

    /// A mapping has a blank class name or alias.
    #[error("mapping at index {index} has a blank {field}")]
    BlankName {
        /// Index of the mapping in the registry.
        index: usize,
        /// Name of the blank field.
        field: &'static str,
    },

    /// An identifier property is not one of the mapping's properties.
    #[error("identifier property '{property}' is not a property of '{class_name}'")]
    UnknownIdProperty {
        /// Class whose mapping is inconsistent.
        class_name: String,
        /// The identifier property that was not found.
        property: String,
    },

    /// Two mappings share the same alias.
    #[error("alias '{alias}' is already mapped")]
    DuplicateAlias {
        /// The alias that collided.
        alias: String,
    },
}
