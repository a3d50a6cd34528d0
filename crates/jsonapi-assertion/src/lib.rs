//! Pre-deserialization assertion of JSON:API resource objects.
//!
//! This crate checks that an inbound resource object is structurally sound
//! and that every submitted attribute names a known property of the expected
//! class before the object is deserialized into a domain type.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Describing classes as [`ResourceMapping`]s behind a [`MappingRepository`]
//! - Loading mappings from a versioned JSON [`MappingRegistry`]
//! - Asserting resource objects with [`DataFormatAssertion`]
//! - Reporting failures as a JSON:API `errors` document via [`ErrorBag`]
//!
//! # Example
//!
//! ```
//! use jsonapi_assertion::{DataFormatAssertion, MappingRegistry};
//! use serde_json::json;
//!
//! let json = r#"{
//!     "version": 1,
//!     "mappings": [{
//!         "className": "Acme\\User",
//!         "alias": "user",
//!         "properties": ["id", "userName", "email"],
//!         "idProperties": ["id"],
//!         "aliasedProperties": ["handle"]
//!     }]
//! }"#;
//!
//! let registry = MappingRegistry::from_json(json).expect("valid registry");
//! let assertion = DataFormatAssertion::new(registry);
//!
//! let payload = json!({
//!     "type": "user",
//!     "attributes": {"user_name": "ada", "email": "ada@example.com", "handle": "@ada"}
//! });
//! assert!(assertion.assert(&payload, "Acme\\User").is_ok());
//! ```

mod assertion;
pub mod check_cli;
mod config;
mod error;
mod mapping;
mod naming;
mod registry;

pub use assertion::{ATTRIBUTES_KEY, DataFormatAssertion, TYPE_KEY};
pub use config::AssertionSettings;
pub use error::{ErrorBag, ErrorDocument, RegistryError, ValidationError};
pub use mapping::ResourceMapping;
pub use naming::normalise_attribute_name;
pub use registry::{MappingRegistry, MappingRepository};
