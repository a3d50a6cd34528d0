//! Checker configuration loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::check_cli::CheckError;

const DEFAULT_MAPPING_FILE: &str = "jsonapi-mappings.json";

/// Configuration values for the `jsonapi-check` binary.
///
/// Values are layered from command-line flags, `JSONAPI_CHECK_*`
/// environment variables, and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JSONAPI_CHECK")]
pub struct AssertionSettings {
    /// Mapping registry file; defaults to `jsonapi-mappings.json`.
    pub mapping_path: Option<PathBuf>,
    /// Resource object file to assert.
    pub payload_path: Option<PathBuf>,
    /// Class identifier the resource object must map to.
    pub class_name: Option<String>,
    /// Pretty-print the errors document.
    #[ortho_config(default = false)]
    pub pretty: bool,
}

impl AssertionSettings {
    /// Return the configured mapping registry path, falling back to the
    /// default file in the working directory.
    #[must_use]
    pub fn mapping_path(&self) -> PathBuf {
        self.mapping_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MAPPING_FILE))
    }

    /// Return the resource object path.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingSetting`] when no path was configured.
    pub fn payload_path(&self) -> Result<&Path, CheckError> {
        self.payload_path
            .as_deref()
            .ok_or(CheckError::MissingSetting {
                name: "payload_path",
            })
    }

    /// Return the expected class identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::MissingSetting`] when no class was configured or
    /// it is blank.
    pub fn class_name(&self) -> Result<&str, CheckError> {
        self.class_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(CheckError::MissingSetting { name: "class_name" })
    }
}
