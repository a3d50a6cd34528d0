//! Mapping repository port and its in-memory JSON-backed implementation.
//!
//! [`MappingRepository`] is the read-only seam the assertion depends on.
//! [`MappingRegistry`] implements it from a versioned JSON document so the
//! checker binary and tests can describe mappings without code.

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::Deserialize;

use crate::error::RegistryError;
use crate::mapping::ResourceMapping;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Read-only lookup of resource mappings by type alias.
///
/// Implementations must be deterministic and side-effect free for a given
/// repository state.
pub trait MappingRepository {
    /// Finds the mapping registered under `alias`, if any.
    fn find_by_alias(&self, alias: &str) -> Option<&ResourceMapping>;
}

impl<R: MappingRepository + ?Sized> MappingRepository for &R {
    fn find_by_alias(&self, alias: &str) -> Option<&ResourceMapping> {
        (**self).find_by_alias(alias)
    }
}

/// An in-memory registry of resource mappings.
///
/// # Example
///
/// ```
/// use jsonapi_assertion::{MappingRegistry, MappingRepository};
///
/// let json = r#"{
///     "version": 1,
///     "mappings": [{
///         "className": "Acme\\Post",
///         "alias": "post",
///         "properties": ["id", "title"],
///         "idProperties": ["id"],
///         "aliasedProperties": []
///     }]
/// }"#;
///
/// let registry = MappingRegistry::from_json(json).expect("valid registry");
/// let mapping = registry.find_by_alias("post").expect("mapping exists");
/// assert_eq!(mapping.class_name(), "Acme\\Post");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRegistry {
    mappings: Vec<ResourceMapping>,
}

impl MappingRegistry {
    /// Parses a mapping registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The mappings array is empty
    /// - A class name or alias is blank
    /// - An identifier property is not a declared property
    /// - Two mappings share an alias
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawMappingRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a mapping registry from a JSON file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, RegistryError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| RegistryError::IoError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawMappingRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.mappings.is_empty() {
            return Err(RegistryError::EmptyMappings);
        }

        raw.mappings
            .into_iter()
            .enumerate()
            .map(|(index, mapping)| mapping.into_mapping(index))
            .try_fold(Self::default(), |registry, mapping| {
                registry.with_mapping(mapping?)
            })
    }

    /// Returns a registry extended with `mapping`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateAlias`] if another mapping already
    /// uses the same alias.
    pub fn with_mapping(mut self, mapping: ResourceMapping) -> Result<Self, RegistryError> {
        if self.mappings.iter().any(|m| m.alias() == mapping.alias()) {
            return Err(RegistryError::DuplicateAlias {
                alias: mapping.alias().to_owned(),
            });
        }
        self.mappings.push(mapping);
        Ok(self)
    }

    /// Returns all registered mappings in registration order.
    #[must_use]
    pub fn mappings(&self) -> &[ResourceMapping] {
        &self.mappings
    }
}

impl MappingRepository for MappingRegistry {
    /// Matches the JSON:API alias first, then the class identifier.
    fn find_by_alias(&self, alias: &str) -> Option<&ResourceMapping> {
        self.mappings
            .iter()
            .find(|m| m.alias() == alias)
            .or_else(|| self.mappings.iter().find(|m| m.class_name() == alias))
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMappingRegistry {
    version: u32,
    mappings: Vec<RawResourceMapping>,
}

/// Raw JSON representation of a single mapping.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceMapping {
    class_name: String,
    alias: String,
    properties: Vec<String>,
    #[serde(default)]
    id_properties: Vec<String>,
    #[serde(default)]
    aliased_properties: Vec<String>,
}

impl RawResourceMapping {
    fn into_mapping(self, index: usize) -> Result<ResourceMapping, RegistryError> {
        if self.class_name.trim().is_empty() {
            return Err(RegistryError::BlankName {
                index,
                field: "className",
            });
        }
        if self.alias.trim().is_empty() {
            return Err(RegistryError::BlankName {
                index,
                field: "alias",
            });
        }
        if let Some(unknown) = self
            .id_properties
            .iter()
            .find(|id| !self.properties.contains(id))
        {
            return Err(RegistryError::UnknownIdProperty {
                class_name: self.class_name.clone(),
                property: unknown.clone(),
            });
        }

        Ok(ResourceMapping::new(self.class_name, self.alias)
            .with_properties(self.properties)
            .with_id_properties(self.id_properties)
            .with_aliased_properties(self.aliased_properties))
    }
}
