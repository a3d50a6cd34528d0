//! Integration tests for resource object assertion.
//!
//! These tests exercise the check sequence end to end through a JSON-loaded
//! mapping registry, covering each structural failure and attribute-name
//! reconciliation.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use jsonapi_assertion::{
    DataFormatAssertion, ErrorBag, MappingRegistry, ResourceMapping, ValidationError,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const USER_CLASS: &str = "Acme\\User";

const MAPPINGS_JSON: &str = r#"{
    "version": 1,
    "mappings": [
        {
            "className": "Acme\\User",
            "alias": "user",
            "properties": ["id", "name", "Username", "emailAddress"],
            "idProperties": ["id"],
            "aliasedProperties": ["handle"]
        },
        {
            "className": "Acme\\Post",
            "alias": "post",
            "properties": ["id", "title"],
            "idProperties": ["id"]
        }
    ]
}"#;

#[fixture]
fn assertion() -> DataFormatAssertion<MappingRegistry> {
    let registry = MappingRegistry::from_json(MAPPINGS_JSON).expect("valid registry");
    DataFormatAssertion::new(registry)
}

fn invalid_attribute(attribute: &str, resource_type: &str) -> ValidationError {
    ValidationError::InvalidAttribute {
        attribute: attribute.to_owned(),
        resource_type: resource_type.to_owned(),
    }
}

#[rstest]
#[case::null(json!(null))]
#[case::boolean(json!(true))]
#[case::number(json!(42))]
#[case::string(json!("user"))]
#[case::list(json!(["user"]))]
#[case::empty_list(json!([]))]
#[case::empty_object(json!({}))]
fn non_object_or_empty_payload_is_missing_data(
    assertion: DataFormatAssertion<MappingRegistry>,
    #[case] payload: Value,
) {
    let result = assertion.assert(&payload, USER_CLASS);
    assert_eq!(result, Err(ErrorBag::from(ValidationError::MissingData)));
}

#[rstest]
#[case::absent(json!({"attributes": {"name": "Ada"}}))]
#[case::null(json!({"type": null, "attributes": {"name": "Ada"}}))]
#[case::empty(json!({"type": "", "attributes": {"name": "Ada"}}))]
#[case::list(json!({"type": ["user"], "attributes": {"name": "Ada"}}))]
fn payload_without_type_is_missing_type(
    assertion: DataFormatAssertion<MappingRegistry>,
    #[case] payload: Value,
) {
    let result = assertion.assert(&payload, USER_CLASS);
    assert_eq!(result, Err(ErrorBag::from(ValidationError::MissingType)));
}

#[rstest]
#[case::other_class("post")]
#[case::unknown("widget")]
fn unexpected_type_is_invalid_type(
    assertion: DataFormatAssertion<MappingRegistry>,
    #[case] resource_type: &str,
) {
    let payload = json!({"type": resource_type, "attributes": {"name": "Ada"}});

    let result = assertion.assert(&payload, USER_CLASS);

    assert_eq!(
        result,
        Err(ErrorBag::from(ValidationError::InvalidType {
            resource_type: resource_type.to_owned()
        }))
    );
}

#[rstest]
fn type_is_checked_before_attributes(assertion: DataFormatAssertion<MappingRegistry>) {
    let payload = json!({"type": "post"});

    let result = assertion.assert(&payload, USER_CLASS);

    assert_eq!(
        result,
        Err(ErrorBag::from(ValidationError::InvalidType {
            resource_type: "post".to_owned()
        }))
    );
}

#[rstest]
#[case::absent(json!({"type": "user"}))]
#[case::null(json!({"type": "user", "attributes": null}))]
#[case::empty(json!({"type": "user", "attributes": {}}))]
#[case::string(json!({"type": "user", "attributes": "name"}))]
fn payload_without_attributes_is_missing_attributes(
    assertion: DataFormatAssertion<MappingRegistry>,
    #[case] payload: Value,
) {
    let result = assertion.assert(&payload, USER_CLASS);
    assert_eq!(result, Err(ErrorBag::from(ValidationError::MissingAttributes)));
}

#[test]
fn identifier_and_unknown_attributes_are_both_reported() {
    let registry = MappingRegistry::default()
        .with_mapping(
            ResourceMapping::new("Acme\\Thing", "thing")
                .with_properties(["id", "name"])
                .with_id_properties(["id"]),
        )
        .expect("unique alias");
    let assertion = DataFormatAssertion::new(registry);
    let payload = json!({"type": "thing", "attributes": {"id": 1, "unknownField": "x"}});

    let result = assertion.assert(&payload, "Acme\\Thing");

    let expected: ErrorBag = [
        invalid_attribute("id", "thing"),
        invalid_attribute("unknownField", "thing"),
    ]
    .into_iter()
    .collect();
    assert_eq!(result, Err(expected));
}

#[test]
fn aliased_identifier_is_accepted() {
    let registry = MappingRegistry::default()
        .with_mapping(
            ResourceMapping::new("Acme\\Thing", "thing")
                .with_properties(["id", "name"])
                .with_id_properties(["id"])
                .with_aliased_properties(["id"]),
        )
        .expect("unique alias");
    let assertion = DataFormatAssertion::new(registry);
    let payload = json!({"type": "thing", "attributes": {"id": 1, "unknownField": "x"}});

    let result = assertion.assert(&payload, "Acme\\Thing");

    assert_eq!(
        result,
        Err(ErrorBag::from(invalid_attribute("unknownField", "thing")))
    );
}

#[rstest]
fn snake_case_matches_pascal_case_property(assertion: DataFormatAssertion<MappingRegistry>) {
    let payload = json!({"type": "user", "attributes": {"user_name": "ada"}});
    assert_eq!(assertion.assert(&payload, USER_CLASS), Ok(()));
}

#[rstest]
fn fully_valid_payload_is_accepted(assertion: DataFormatAssertion<MappingRegistry>) {
    let payload = json!({
        "type": "user",
        "attributes": {
            "handle": "@ada",
            "name": "Ada",
            "Username": "ada",
            "email_address": "ada@example.com"
        }
    });

    assert_eq!(assertion.assert(&payload, USER_CLASS), Ok(()));
}

#[rstest]
fn unknown_attributes_follow_input_order(assertion: DataFormatAssertion<MappingRegistry>) {
    let payload = json!({
        "type": "user",
        "attributes": {"zip": 1, "name": "Ada", "apple": 2, "handle_name": 3}
    });

    let result = assertion.assert(&payload, USER_CLASS);

    let expected: ErrorBag = ["zip", "apple", "handle_name"]
        .into_iter()
        .map(|attribute| invalid_attribute(attribute, "user"))
        .collect();
    assert_eq!(result, Err(expected));
}

#[rstest]
fn repeated_assertions_yield_same_outcome(assertion: DataFormatAssertion<MappingRegistry>) {
    let payload = json!({"type": "user", "attributes": {"id": 7, "name": "Ada"}});

    let first = assertion.assert(&payload, USER_CLASS);
    let second = assertion.assert(&payload, USER_CLASS);

    assert_eq!(first, second);
    assert_eq!(first, Err(ErrorBag::from(invalid_attribute("id", "user"))));
}

#[rstest]
fn rejected_payload_renders_errors_document(assertion: DataFormatAssertion<MappingRegistry>) {
    let payload = json!({"type": "user", "attributes": {"colour": "red"}});

    let errors = assertion
        .assert(&payload, USER_CLASS)
        .expect_err("unknown attribute");
    let document = serde_json::to_value(errors.to_document()).expect("serializable");

    assert_eq!(
        document,
        json!({"errors": [{
            "status": "422",
            "code": "invalid_attribute",
            "title": "Invalid Attribute",
            "detail": "Attribute `colour` for resource of type `user` is not valid.",
            "source": {"pointer": "/data/attributes/colour"}
        }]})
    );
}
