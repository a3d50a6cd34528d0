//! Library half of the `jsonapi-check` binary.
//!
//! The binary delegates to these functions so loading, assertion, and report
//! rendering can be exercised in tests without spawning a subprocess.

mod error;

use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde_json::Value;
use tracing::info;

use crate::assertion::DataFormatAssertion;
use crate::config::AssertionSettings;
use crate::error::ErrorBag;
use crate::registry::MappingRegistry;

pub use error::CheckError;

/// Result of asserting one resource object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The resource object passed every check.
    Accepted,
    /// The resource object failed validation.
    Rejected(ErrorBag),
}

impl CheckOutcome {
    /// Returns `true` when the resource object passed validation.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Loads the configured registry and resource object, then asserts it.
///
/// # Errors
///
/// Returns [`CheckError`] when a setting is missing or an input file cannot
/// be read or parsed. Validation failures are reported as
/// [`CheckOutcome::Rejected`].
///
/// # Example
///
/// ```no_run
/// use jsonapi_assertion::AssertionSettings;
/// use jsonapi_assertion::check_cli::run_check;
///
/// let settings = AssertionSettings {
///     mapping_path: Some("mappings.json".into()),
///     payload_path: Some("post.json".into()),
///     class_name: Some("Acme\\Post".to_owned()),
///     pretty: false,
/// };
/// let outcome = run_check(&settings).expect("inputs load");
/// assert!(outcome.is_accepted());
/// ```
pub fn run_check(settings: &AssertionSettings) -> Result<CheckOutcome, CheckError> {
    let class_name = settings.class_name()?;
    let mapping_path = utf8_path(&settings.mapping_path())?;
    let payload_path = utf8_path(settings.payload_path()?)?;

    let (mapping_dir, mapping_file) = open_parent(&mapping_path)?;
    let registry = MappingRegistry::from_file(&mapping_dir, mapping_file)?;
    let payload = read_payload(&payload_path)?;

    let outcome = check_payload(&registry, &payload, class_name);
    info!(
        payload = %payload_path,
        class_name,
        accepted = outcome.is_accepted(),
        "resource object checked"
    );
    Ok(outcome)
}

/// Asserts an already-decoded resource object against `registry`.
#[must_use]
pub fn check_payload(registry: &MappingRegistry, payload: &Value, class_name: &str) -> CheckOutcome {
    match DataFormatAssertion::new(registry).assert(payload, class_name) {
        Ok(()) => CheckOutcome::Accepted,
        Err(errors) => CheckOutcome::Rejected(errors),
    }
}

/// Renders the JSON:API errors document for a rejected resource object.
///
/// Returns `None` for an accepted resource object.
///
/// # Errors
///
/// Returns [`CheckError::Report`] if the document cannot be serialized.
pub fn render_report(outcome: &CheckOutcome, pretty: bool) -> Result<Option<String>, CheckError> {
    let CheckOutcome::Rejected(errors) = outcome else {
        return Ok(None);
    };
    let document = errors.to_document();
    let rendered = if pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    rendered.map(Some).map_err(|e| CheckError::Report {
        message: e.to_string(),
    })
}

fn utf8_path(path: &Path) -> Result<Utf8PathBuf, CheckError> {
    Utf8PathBuf::try_from(path.to_path_buf()).map_err(|_| CheckError::NonUtf8Path {
        path: path.to_string_lossy().into_owned(),
    })
}

/// Opens the directory containing `path` and returns it with the file name.
fn open_parent(path: &Utf8Path) -> Result<(Dir, &Utf8Path), CheckError> {
    let io_error = |e: std::io::Error| CheckError::Io {
        path: path.to_string(),
        message: e.to_string(),
    };
    let file_name = path.file_name().map(Utf8Path::new).ok_or_else(|| {
        io_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    Ok((dir, file_name))
}

fn read_payload(path: &Utf8Path) -> Result<Value, CheckError> {
    let (dir, file_name) = open_parent(path)?;
    let contents = dir.read_to_string(file_name).map_err(|e| CheckError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| CheckError::InvalidPayload {
        path: path.to_string(),
        message: e.to_string(),
    })
}
