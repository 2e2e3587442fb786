use jsonvalid::{
    CompilationConfig, Draft, JSONSchema, SchemaResolver, ValidationErrorKind,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use url::Url;

fn validate(schema: &Value, instance: &Value) -> Result<(), jsonvalid::ValidationError> {
    JSONSchema::compile(schema, None)
        .expect("Invalid schema")
        .validate(instance)
}

#[test]
fn basic_type() {
    let schema = json!({"type": "integer"});
    let error = validate(&schema, &json!(3.5)).unwrap_err();
    assert_eq!(
        error.to_value(),
        json!({"error": "wrong-type", "expected": "integer", "data": 3.5})
    );
}

#[test]
fn required_property() {
    let schema = json!({
        "type": "object",
        "required": ["a"],
        "properties": {"a": {"type": "string"}}
    });
    let error = validate(&schema, &json!({})).unwrap_err();
    assert_eq!(
        error.to_value(),
        json!({
            "error": "properties",
            "properties": {"a": {"error": "missing-property"}},
            "data": {}
        })
    );
}

#[test]
fn pointer_ref() {
    let schema = json!({
        "definitions": {"pos": {"type": "integer", "minimum": 1}},
        "$ref": "#/definitions/pos"
    });
    let error = validate(&schema, &json!(0)).unwrap_err();
    assert_eq!(
        error.to_value(),
        json!({"error": "out-of-bounds", "minimum": 1.0, "exclusive": false, "data": 0})
    );
}

#[test]
fn all_of() {
    let schema = json!({"allOf": [{"type": "integer"}, {"minimum": 10}]});
    let error = validate(&schema, &json!(5)).unwrap_err();
    assert!(matches!(
        error.kind(),
        ValidationErrorKind::DoesNotMatchAllOf { .. }
    ));
    assert!(validate(&schema, &json!(12)).is_ok());
    let error = validate(&schema, &json!("x")).unwrap_err();
    assert!(matches!(
        error.kind(),
        ValidationErrorKind::DoesNotMatchAllOf { .. }
    ));
}

#[test]
fn all_of_single_schema_identity() {
    let single = json!({"minimum": 10});
    let wrapped = json!({"allOf": [{"minimum": 10}]});
    for instance in &[json!(5), json!(10), json!(15), json!("x"), json!(null)] {
        assert_eq!(
            jsonvalid::is_valid(&single, instance),
            jsonvalid::is_valid(&wrapped, instance)
        );
    }
}

#[test]
fn unique_items_duplicates() {
    let schema = json!({"type": "array", "uniqueItems": true});
    let error = validate(&schema, &json!([1, 2, 1, 3, 2])).unwrap_err();
    assert_eq!(
        error.to_value(),
        json!({
            "error": "duplicate-items-not-allowed",
            "duplicates": [1, 2],
            "data": [1, 2, 1, 3, 2]
        })
    );
}

#[test]
fn additional_properties_schema() {
    let schema = json!({
        "type": "object",
        "properties": {"a": {"type": "integer"}},
        "additionalProperties": {"type": "string"}
    });
    let instance = json!({"a": 1, "b": "ok", "c": 7});
    let error = validate(&schema, &instance).unwrap_err();
    assert_eq!(
        error.to_value(),
        json!({
            "error": "invalid-additional-properties",
            "invalid-additional-properties": {
                "c": {"error": "wrong-type", "expected": "string", "data": 7}
            },
            "data": instance
        })
    );
}

#[test]
fn dependencies_array_form() {
    let schema = json!({"dependencies": {"credit_card": ["billing_address"]}});
    let error = validate(&schema, &json!({"credit_card": 1})).unwrap_err();
    assert_eq!(
        error.to_value(),
        json!({
            "error": "dependency-mismatch",
            "dependency": {"credit_card": ["billing_address"]},
            "data": {"credit_card": 1}
        })
    );
    assert!(validate(&schema, &json!({"credit_card": 1, "billing_address": "x"})).is_ok());
}

#[test]
fn ref_transparency() {
    let root = json!({
        "definitions": {"x": {"type": "string", "minLength": 2}},
        "$ref": "#/definitions/x"
    });
    let plain = json!({"type": "string", "minLength": 2});
    for instance in &[json!("ab"), json!("a"), json!(5)] {
        assert_eq!(
            jsonvalid::is_valid(&root, instance),
            jsonvalid::is_valid(&plain, instance)
        );
    }
}

#[test]
fn pattern_property_closure() {
    // A key matching the pattern is judged by the pattern schema even with
    // additionalProperties: false and a `properties` entry for the same key
    let schema = json!({
        "properties": {"xa": {}},
        "patternProperties": {"^x": {"type": "integer"}},
        "additionalProperties": false
    });
    assert!(jsonvalid::is_valid(&schema, &json!({"xa": 1})));
    assert!(!jsonvalid::is_valid(&schema, &json!({"xa": "s"})));
    assert!(jsonvalid::is_valid(&schema, &json!({"xb": 2})));
    assert!(!jsonvalid::is_valid(&schema, &json!({"other": 1})));
}

#[test]
fn empty_containers() {
    assert!(jsonvalid::is_valid(&json!({"type": "object"}), &json!({})));
    assert!(jsonvalid::is_valid(&json!({"type": "array"}), &json!([])));
}

#[test]
fn draft3_required_markers() {
    let schema = json!({
        "properties": {
            "a": {"type": "string", "required": true},
            "b": {"type": "integer"}
        }
    });
    let mut config = CompilationConfig::default();
    config.set_draft(Draft::Draft3);
    let compiled = JSONSchema::compile(&schema, Some(config)).unwrap();
    assert!(compiled.validate(&json!({"a": "x"})).is_ok());
    assert!(compiled.validate(&json!({"a": "x", "b": 2})).is_ok());
    let error = compiled.validate(&json!({"b": 2})).unwrap_err();
    match error.kind() {
        ValidationErrorKind::Properties { properties } => {
            assert_eq!(properties[0].0, "a");
            assert!(matches!(
                properties[0].1.kind(),
                ValidationErrorKind::MissingProperty
            ));
        }
        _ => panic!("Expected properties error"),
    }
}

#[test]
fn draft3_is_detected_from_schema_url() {
    let schema = json!({
        "$schema": "http://json-schema.org/draft-03/schema#",
        "properties": {"a": {"required": true}}
    });
    let compiled = JSONSchema::compile(&schema, None).unwrap();
    assert!(compiled.validate(&json!({})).is_err());
    assert!(compiled.validate(&json!({"a": 1})).is_ok());
}

#[test]
fn draft4_rejects_boolean_required() {
    // The boolean marker is draft 3 only; under draft 4 `required` must be
    // an array of names
    let schema = json!({"properties": {"a": {"required": true}}});
    assert!(JSONSchema::compile(&schema, None).is_err());
}

#[test]
fn resolution_failure_is_fatal_inside_not() {
    // `not` would otherwise turn the failure into a success
    let schema = json!({"not": {"$ref": "#/nope"}});
    let compiled = JSONSchema::compile(&schema, None).unwrap();
    let error = compiled.validate(&json!(1)).unwrap_err();
    assert!(error.is_resolution_failure());
}

#[test]
fn external_file_ref() {
    let mut path = std::env::temp_dir();
    path.push(format!("jsonvalid-external-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r##"{"definitions": {"name": {"type": "string", "minLength": 1}}, "$ref": "#/definitions/name"}"##,
    )
    .unwrap();

    let schema = json!({ "$ref": format!("file://{}", path.display()) });
    let compiled = JSONSchema::compile(&schema, None).unwrap();
    assert!(compiled.validate(&json!("x")).is_ok());
    assert!(compiled.validate(&json!("")).is_err());
    assert!(compiled.validate(&json!(1)).is_err());

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_external_schema_is_unresolvable() {
    let schema = json!({"$ref": "file:///definitely/not/there.json"});
    let compiled = JSONSchema::compile(&schema, None).unwrap();
    let error = compiled.validate(&json!(1)).unwrap_err();
    assert!(error.is_resolution_failure());
}

struct InMemoryResolver {
    document: Value,
    fetches: Arc<AtomicUsize>,
}

impl SchemaResolver for InMemoryResolver {
    fn resolve(&self, url: &Url) -> Option<Value> {
        if url.as_str() == "mem:///doc" {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Some(self.document.clone())
        } else {
            None
        }
    }
}

#[test]
fn remote_document_becomes_the_root_for_its_pointers() {
    // The fragment inside the fetched document must resolve against that
    // document, not against the original root
    let document = json!({
        "definitions": {
            "node": {
                "properties": {
                    "name": {"$ref": "#/definitions/name"},
                    "tag": {"$ref": "#/definitions/tag"}
                }
            },
            "name": {"type": "string"},
            "tag": {"type": "integer"}
        }
    });
    let schema = json!({"$ref": "mem:///doc#/definitions/node"});
    let mut config = CompilationConfig::default();
    config.set_resolver(Box::new(InMemoryResolver {
        document,
        fetches: Arc::new(AtomicUsize::new(0)),
    }));
    let compiled = JSONSchema::compile(&schema, Some(config)).unwrap();
    assert!(compiled.validate(&json!({"name": "a", "tag": 1})).is_ok());
    assert!(compiled.validate(&json!({"name": 1})).is_err());
    assert!(compiled.validate(&json!({"tag": "a"})).is_err());
}

#[test]
fn remote_document_is_fetched_once() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let resolver = InMemoryResolver {
        document: json!({
            "definitions": {
                "a": {"type": "integer"},
                "b": {"type": "string"}
            }
        }),
        fetches: fetches.clone(),
    };
    let schema = json!({
        "properties": {
            "x": {"$ref": "mem:///doc#/definitions/a"},
            "y": {"$ref": "mem:///doc#/definitions/b"}
        }
    });
    let mut config = CompilationConfig::default();
    config.set_resolver(Box::new(resolver));
    let compiled = JSONSchema::compile(&schema, Some(config)).unwrap();
    assert!(compiled.validate(&json!({"x": 1, "y": "s"})).is_ok());
    assert!(compiled.validate(&json!({"x": "s"})).is_err());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn ref_chain_through_remote_document() {
    // The chain hops into the document and follows a fragment ref inside it
    let document = json!({
        "definitions": {
            "alias": {"$ref": "#/definitions/actual"},
            "actual": {"type": "integer"}
        }
    });
    let schema = json!({"$ref": "mem:///doc#/definitions/alias"});
    let mut config = CompilationConfig::default();
    config.set_resolver(Box::new(InMemoryResolver {
        document,
        fetches: Arc::new(AtomicUsize::new(0)),
    }));
    let compiled = JSONSchema::compile(&schema, Some(config)).unwrap();
    assert!(compiled.validate(&json!(3)).is_ok());
    assert!(compiled.validate(&json!("x")).is_err());
}

#[test]
fn multiple_of_tolerance() {
    assert!(jsonvalid::is_valid(&json!({"multipleOf": 0.1}), &json!(0.3)));
    assert!(jsonvalid::is_valid(&json!({"multipleOf": 2}), &json!(0)));
    assert!(!jsonvalid::is_valid(&json!({"multipleOf": 0.1}), &json!(0.35)));
}

#[test]
fn validation_is_deterministic() {
    let schema = json!({
        "properties": {
            "a": {"type": "integer"},
            "b": {"type": "integer"}
        },
        "required": ["c"]
    });
    let instance = json!({"a": "x", "b": "y"});
    let compiled = JSONSchema::compile(&schema, None).unwrap();
    let first = compiled.validate(&instance).unwrap_err().to_value();
    for _ in 0..3 {
        assert_eq!(compiled.validate(&instance).unwrap_err().to_value(), first);
    }
}
