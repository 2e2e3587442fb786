use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    helpers,
    keywords::{format_validators, CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

/// The single-schema `items` form: every element is validated against one
/// sub-schema. Per-position first errors are collected into one record.
pub(crate) struct ItemsObjectValidator {
    validators: Validators,
}

impl ItemsObjectValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext) -> CompilationResult {
        let validators = compile_validators(schema, context)?;
        Ok(Box::new(ItemsObjectValidator { validators }))
    }
}

impl Validate for ItemsObjectValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Array(items) = instance {
            let mut errors = Vec::new();
            for (position, item) in items.iter().enumerate() {
                for validator in &self.validators {
                    if let Err(error) = validator.validate(schema, item) {
                        if error.is_resolution_failure() {
                            return Err(error);
                        }
                        errors.push((position, error));
                        break;
                    }
                }
            }
            if !errors.is_empty() {
                return Err(ValidationError::array_items(instance, errors));
            }
        }
        Ok(())
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.iter().all(|item| {
                self.validators
                    .iter()
                    .all(|validator| validator.is_valid(schema, item))
            })
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("items: {}", format_validators(&self.validators))
    }
}

/// A pure enum `items` schema is checked element-by-element right here
/// instead of dispatching into a nested validator battery. Semantics are
/// identical to the generic form.
pub(crate) struct ItemsEnumValidator {
    options: Value,
    items: Vec<Value>,
}

impl ItemsEnumValidator {
    #[inline]
    pub(crate) fn compile(options: &Value) -> CompilationResult {
        if let Value::Array(items) = options {
            return Ok(Box::new(ItemsEnumValidator {
                options: options.clone(),
                items: items.clone(),
            }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for ItemsEnumValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Array(elements) = instance {
            if !self.is_valid(schema, instance) {
                let mut errors = Vec::new();
                for (position, element) in elements.iter().enumerate() {
                    if !self.items.iter().any(|item| helpers::equal(item, element)) {
                        errors.push((
                            position,
                            ValidationError::invalid_enum_value(element, &self.options),
                        ));
                    }
                }
                return Err(ValidationError::array_items(instance, errors));
            }
        }
        Ok(())
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Array(elements) = instance {
            elements.iter().all(|element| {
                self.items.iter().any(|item| helpers::equal(item, element))
            })
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("items: {{enum: {}}}", self.options)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    match schema {
        Value::Object(subschema) => {
            if subschema.len() == 1 {
                if let Some(options) = subschema.get("enum") {
                    return Some(ItemsEnumValidator::compile(options));
                }
            }
            Some(ItemsObjectValidator::compile(schema, context))
        }
        // The tuple form is not supported
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, JSONSchema, ValidationErrorKind};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"items": {"type": "integer"}}), json!([1, 2, 3]))]
    #[test_case(json!({"items": {"type": "integer"}}), json!([]))]
    #[test_case(json!({"items": {"enum": ["a", "b"]}}), json!(["a", "b", "a"]))]
    fn valid(schema: Value, instance: Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(json!({"items": {"type": "integer"}}), json!([1, "x"]))]
    #[test_case(json!({"items": {"enum": ["a", "b"]}}), json!(["a", "c"]))]
    fn invalid(schema: Value, instance: Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn positions_are_recorded() {
        let schema = json!({"items": {"type": "integer"}});
        let compiled = JSONSchema::compile(&schema, None).unwrap();
        let error = compiled.validate(&json!([1, "x", 2, "y"])).unwrap_err();
        match error.kind() {
            ValidationErrorKind::ArrayItems { items } => {
                let positions: Vec<usize> = items.iter().map(|(i, _)| *i).collect();
                assert_eq!(positions, vec![1, 3])
            }
            _ => panic!("Expected array items"),
        }
    }

    #[test]
    fn enum_specialization_matches_generic_form() {
        // Both forms must agree; the specialized one skips re-dispatching
        let specialized = json!({"items": {"enum": [1, 2]}});
        let generic = json!({"items": {"enum": [1, 2], "type": "integer"}});
        for instance in &[json!([1, 2, 1]), json!([1, 3]), json!(["x"])] {
            assert_eq!(
                crate::is_valid(&specialized, instance),
                crate::is_valid(&generic, instance)
            );
        }
    }

    #[test]
    fn tuple_form_is_rejected() {
        let schema = json!({"items": [{"type": "integer"}]});
        assert!(JSONSchema::compile(&schema, None).is_err())
    }
}
