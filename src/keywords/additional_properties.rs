use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::{format_validators, CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use regex::Regex;
use serde_json::{Map, Value};
use std::{collections::BTreeSet, iter::FromIterator};

/// A property is "additional" when it is neither declared in `properties`
/// nor matched by any `patternProperties` regex. The patterns are fused into
/// one alternation, compiled once.
struct AdditionalFilter {
    properties: BTreeSet<String>,
    pattern: Option<Regex>,
}

impl AdditionalFilter {
    fn compile(parent: &Map<String, Value>) -> Result<AdditionalFilter, CompilationError> {
        let properties = match parent.get("properties") {
            Some(Value::Object(map)) => BTreeSet::from_iter(map.keys().cloned()),
            Some(_) => return Err(CompilationError::SchemaError),
            None => BTreeSet::new(),
        };
        let pattern = match parent.get("patternProperties") {
            Some(Value::Object(map)) => {
                let pattern = map.keys().cloned().collect::<Vec<String>>().join("|");
                Some(Regex::new(&pattern)?)
            }
            Some(_) => return Err(CompilationError::SchemaError),
            None => None,
        };
        Ok(AdditionalFilter {
            properties,
            pattern,
        })
    }

    fn is_additional(&self, property: &str) -> bool {
        !self.properties.contains(property)
            && !self
                .pattern
                .as_ref()
                .map_or(false, |pattern| pattern.is_match(property))
    }
}

/// `additionalProperties: false`: any extra property is a violation; all of
/// them are reported at once.
pub(crate) struct AdditionalPropertiesFalseValidator {
    filter: AdditionalFilter,
}

impl AdditionalPropertiesFalseValidator {
    #[inline]
    pub(crate) fn compile(parent: &Map<String, Value>) -> CompilationResult {
        Ok(Box::new(AdditionalPropertiesFalseValidator {
            filter: AdditionalFilter::compile(parent)?,
        }))
    }
}

impl Validate for AdditionalPropertiesFalseValidator {
    fn validate(&self, _: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Object(item) = instance {
            let extras: Vec<String> = item
                .keys()
                .filter(|property| self.filter.is_additional(property))
                .cloned()
                .collect();
            if !extras.is_empty() {
                return Err(ValidationError::additional_properties(instance, extras));
            }
        }
        Ok(())
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.keys().all(|property| !self.filter.is_additional(property))
        } else {
            true
        }
    }

    fn name(&self) -> String {
        "additionalProperties: false".to_string()
    }
}

/// `additionalProperties: <schema>`: every extra property's value is
/// validated; failures are collected per key.
pub(crate) struct AdditionalPropertiesValidator {
    filter: AdditionalFilter,
    validators: Validators,
}

impl AdditionalPropertiesValidator {
    #[inline]
    pub(crate) fn compile(
        parent: &Map<String, Value>,
        schema: &Value,
        context: &CompilationContext,
    ) -> CompilationResult {
        Ok(Box::new(AdditionalPropertiesValidator {
            filter: AdditionalFilter::compile(parent)?,
            validators: compile_validators(schema, context)?,
        }))
    }
}

impl Validate for AdditionalPropertiesValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Object(item) = instance {
            let mut errors: Vec<(String, ValidationError)> = Vec::new();
            for (property, value) in item {
                if !self.filter.is_additional(property) {
                    continue;
                }
                for validator in &self.validators {
                    if let Err(error) = validator.validate(schema, value) {
                        if error.is_resolution_failure() {
                            return Err(error);
                        }
                        errors.push((property.clone(), error));
                        break;
                    }
                }
            }
            if !errors.is_empty() {
                return Err(ValidationError::invalid_additional_properties(
                    instance, errors,
                ));
            }
        }
        Ok(())
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            item.iter()
                .filter(|(property, _)| self.filter.is_additional(property))
                .all(|(_, value)| {
                    self.validators
                        .iter()
                        .all(|validator| validator.is_valid(schema, value))
                })
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!(
            "additionalProperties: {}",
            format_validators(&self.validators)
        )
    }
}

#[inline]
pub(crate) fn compile(
    parent: &Map<String, Value>,
    schema: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    match schema {
        // "additionalProperties" are "true" by default
        Value::Bool(true) => None,
        Value::Bool(false) => Some(AdditionalPropertiesFalseValidator::compile(parent)),
        // An empty schema matches everything, same as `true`
        Value::Object(subschema) if subschema.is_empty() => None,
        Value::Object(_) => Some(AdditionalPropertiesValidator::compile(
            parent, schema, context,
        )),
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, JSONSchema, ValidationErrorKind};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"additionalProperties": false}), json!({}))]
    #[test_case(json!({"additionalProperties": false, "properties": {"a": {}}}), json!({"a": 1}))]
    #[test_case(json!({"additionalProperties": true}), json!({"a": 1}))]
    #[test_case(json!({"additionalProperties": {}}), json!({"a": 1}); "empty schema is a no-op")]
    #[test_case(json!({"additionalProperties": {"type": "string"}, "properties": {"a": {}}}), json!({"a": 1, "b": "ok"}))]
    #[test_case(json!({"additionalProperties": false, "patternProperties": {"^x": {}}}), json!({"xa": 1}))]
    fn valid(schema: Value, instance: Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(json!({"additionalProperties": false}), json!({"a": 1}))]
    #[test_case(json!({"additionalProperties": false, "properties": {"a": {}}}), json!({"a": 1, "b": 2}))]
    #[test_case(json!({"additionalProperties": {"type": "string"}}), json!({"a": 1}))]
    #[test_case(json!({"additionalProperties": false, "patternProperties": {"^x": {}}}), json!({"ya": 1}))]
    fn invalid(schema: Value, instance: Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn extras_are_reported_together() {
        let schema = json!({"additionalProperties": false, "properties": {"a": {}}});
        let compiled = JSONSchema::compile(&schema, None).unwrap();
        let error = compiled
            .validate(&json!({"a": 1, "b": 2, "c": 3}))
            .unwrap_err();
        match error.kind() {
            ValidationErrorKind::AdditionalProperties { property_names } => {
                assert_eq!(property_names, &["b".to_string(), "c".to_string()])
            }
            _ => panic!("Expected additional properties"),
        }
    }

    #[test]
    fn failing_extras_are_collected() {
        let schema = json!({
            "type": "object",
            "properties": {"a": {"type": "integer"}},
            "additionalProperties": {"type": "string"}
        });
        let compiled = JSONSchema::compile(&schema, None).unwrap();
        let error = compiled
            .validate(&json!({"a": 1, "b": "ok", "c": 7}))
            .unwrap_err();
        match error.kind() {
            ValidationErrorKind::InvalidAdditionalProperties { properties } => {
                assert_eq!(properties.len(), 1);
                assert_eq!(properties[0].0, "c");
                assert!(matches!(
                    properties[0].1.kind(),
                    ValidationErrorKind::WrongType { .. }
                ));
            }
            _ => panic!("Expected invalid additional properties"),
        }
    }
}
