//! Resource mapping metadata.
//!
//! A [`ResourceMapping`] describes how one domain class is exposed as a
//! JSON:API resource: its class identifier, its type alias, the canonical
//! property names, which of those form the identifier, and any extra
//! attribute names accepted verbatim.

/// Describes how a domain class's properties map to wire-level attributes.
///
/// # Example
///
/// ```
/// use jsonapi_assertion::ResourceMapping;
///
/// let mapping = ResourceMapping::new("Acme\\Post", "post")
///     .with_properties(["id", "title", "authorName"])
///     .with_id_properties(["id"])
///     .with_aliased_properties(["headline"]);
///
/// assert_eq!(mapping.alias(), "post");
/// assert_eq!(
///     mapping.attribute_properties().collect::<Vec<_>>(),
///     vec!["title", "authorName"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMapping {
    class_name: String,
    alias: String,
    properties: Vec<String>,
    id_properties: Vec<String>,
    aliased_properties: Vec<String>,
}

impl ResourceMapping {
    /// Creates a mapping with no properties.
    #[must_use]
    pub fn new(class_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            alias: alias.into(),
            properties: Vec::new(),
            id_properties: Vec::new(),
            aliased_properties: Vec::new(),
        }
    }

    /// Replaces the canonical property names, preserving their order.
    #[must_use]
    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the identifier property names.
    #[must_use]
    pub fn with_id_properties<I, S>(mut self, id_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_properties = id_properties.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the attribute names accepted verbatim as aliases.
    #[must_use]
    pub fn with_aliased_properties<I, S>(mut self, aliased_properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliased_properties = aliased_properties.into_iter().map(Into::into).collect();
        self
    }

    /// Class identifier the mapping describes.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// JSON:API type name the class is exposed as.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Canonical property names in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// Properties forming the resource identity.
    #[must_use]
    pub fn id_properties(&self) -> &[String] {
        &self.id_properties
    }

    /// Attribute names accepted verbatim as aliases.
    #[must_use]
    pub fn aliased_properties(&self) -> &[String] {
        &self.aliased_properties
    }

    /// Canonical properties that may be written as attributes, i.e. every
    /// property that is not an identifier property.
    pub fn attribute_properties(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|property| !self.id_properties.contains(property))
            .map(String::as_str)
    }
}
