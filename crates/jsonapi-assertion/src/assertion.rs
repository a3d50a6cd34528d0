//! Structural and attribute-name assertion of a JSON:API resource object.
//!
//! [`DataFormatAssertion`] runs an ordered sequence of checks against a
//! decoded resource object. The structural checks (object shape, `type`
//! presence, `type` resolution, `attributes` presence) stop at the first
//! failure because nothing after them can be judged without a mapping. The
//! attribute-name check reports every unrecognised key in one pass.
//!
//! An attribute key is recognised when, in order of precedence:
//!
//! 1. it equals one of the mapping's aliased properties;
//! 2. it equals a non-identifier property name;
//! 3. its [normalised](crate::normalise_attribute_name) form equals a
//!    lower-cased non-identifier property name.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{ErrorBag, ValidationError};
use crate::mapping::ResourceMapping;
use crate::naming::normalise_attribute_name;
use crate::registry::MappingRepository;

/// Resource object member holding the JSON:API type name.
pub const TYPE_KEY: &str = "type";

/// Resource object member holding the attribute object.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Asserts that resource objects are well formed for a given class.
///
/// # Example
///
/// ```
/// use jsonapi_assertion::{
///     DataFormatAssertion, MappingRegistry, ResourceMapping, ValidationError,
/// };
/// use serde_json::json;
///
/// let registry = MappingRegistry::default()
///     .with_mapping(
///         ResourceMapping::new("Acme\\Post", "post")
///             .with_properties(["id", "title", "authorName"])
///             .with_id_properties(["id"]),
///     )
///     .expect("unique alias");
/// let assertion = DataFormatAssertion::new(registry);
///
/// let valid = json!({"type": "post", "attributes": {"title": "Hi", "author_name": "Ada"}});
/// assert!(assertion.assert(&valid, "Acme\\Post").is_ok());
///
/// let invalid = json!({"type": "post", "attributes": {"colour": "red"}});
/// let errors = assertion.assert(&invalid, "Acme\\Post").expect_err("unknown attribute");
/// assert_eq!(
///     errors.as_slice(),
///     &[ValidationError::InvalidAttribute {
///         attribute: "colour".to_owned(),
///         resource_type: "post".to_owned(),
///     }]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DataFormatAssertion<R> {
    repository: R,
}

impl<R: MappingRepository> DataFormatAssertion<R> {
    /// Creates an assertion backed by `repository`.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the mapping repository backing this assertion.
    #[must_use]
    pub const fn repository(&self) -> &R {
        &self.repository
    }

    /// Asserts that `payload` is a valid resource object of `class_name`.
    ///
    /// # Errors
    ///
    /// Returns a non-empty [`ErrorBag`] when the payload fails validation.
    /// Structural failures yield exactly one error; unrecognised attributes
    /// yield one [`ValidationError::InvalidAttribute`] each, in input order.
    pub fn assert(&self, payload: &Value, class_name: &str) -> Result<(), ErrorBag> {
        let resource = assert_is_object(payload)?;
        let resource_type = assert_has_type(resource)?;
        let mapping = self.assert_type_is_expected(resource_type, class_name)?;
        let attributes = assert_has_attributes(resource)?;

        let errors = unknown_attributes(attributes, mapping, resource_type);
        if errors.is_empty() {
            trace!(resource_type, class_name, "resource object accepted");
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn assert_type_is_expected(
        &self,
        resource_type: &str,
        class_name: &str,
    ) -> Result<&ResourceMapping, ErrorBag> {
        match self.repository.find_by_alias(resource_type) {
            Some(mapping) if mapping.class_name() == class_name => Ok(mapping),
            found => {
                debug!(
                    resource_type,
                    expected = class_name,
                    resolved = found.map(ResourceMapping::class_name),
                    "resource type does not map to the expected class"
                );
                Err(ValidationError::InvalidType {
                    resource_type: resource_type.to_owned(),
                }
                .into())
            }
        }
    }
}

fn assert_is_object(payload: &Value) -> Result<&Map<String, Value>, ErrorBag> {
    match payload.as_object() {
        Some(resource) if !resource.is_empty() => Ok(resource),
        _ => {
            debug!("resource object is missing or empty");
            Err(ValidationError::MissingData.into())
        }
    }
}

fn assert_has_type(resource: &Map<String, Value>) -> Result<&str, ErrorBag> {
    match resource.get(TYPE_KEY).and_then(Value::as_str) {
        Some(resource_type) if !resource_type.is_empty() => Ok(resource_type),
        _ => {
            debug!("resource object has no type member");
            Err(ValidationError::MissingType.into())
        }
    }
}

fn assert_has_attributes(resource: &Map<String, Value>) -> Result<&Map<String, Value>, ErrorBag> {
    match resource.get(ATTRIBUTES_KEY).and_then(Value::as_object) {
        Some(attributes) if !attributes.is_empty() => Ok(attributes),
        _ => {
            debug!("resource object has no attributes member");
            Err(ValidationError::MissingAttributes.into())
        }
    }
}

/// Collects one error per attribute key the mapping does not recognise.
fn unknown_attributes(
    attributes: &Map<String, Value>,
    mapping: &ResourceMapping,
    resource_type: &str,
) -> ErrorBag {
    let names = AttributeNames::from_mapping(mapping);
    attributes
        .keys()
        .filter(|key| !names.recognises(key))
        .map(|key| {
            debug!(resource_type, attribute = %key, "attribute is not recognised");
            ValidationError::InvalidAttribute {
                attribute: key.clone(),
                resource_type: resource_type.to_owned(),
            }
        })
        .collect()
}

/// The accepted attribute spellings of one mapping.
struct AttributeNames<'a> {
    aliases: &'a [String],
    writable: Vec<&'a str>,
    lowered: Vec<String>,
}

impl<'a> AttributeNames<'a> {
    fn from_mapping(mapping: &'a ResourceMapping) -> Self {
        let writable: Vec<&str> = mapping.attribute_properties().collect();
        let lowered = writable.iter().map(|p| p.to_ascii_lowercase()).collect();
        Self {
            aliases: mapping.aliased_properties(),
            writable,
            lowered,
        }
    }

    fn recognises(&self, key: &str) -> bool {
        self.aliases.iter().any(|alias| alias == key)
            || self.writable.contains(&key)
            || self.matches_normalised(key)
    }

    fn matches_normalised(&self, key: &str) -> bool {
        let normalised = normalise_attribute_name(key);
        self.lowered.iter().any(|property| *property == normalised)
    }
}
