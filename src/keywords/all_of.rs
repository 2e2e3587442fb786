use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::{format_vec_of_validators, CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

/// Fails when any sub-schema fails. Only the combinator-level error is
/// reported, carrying the sub-schemas; per-branch details are not
/// aggregated.
pub(crate) struct AllOfValidator {
    original: Value,
    schemas: Vec<Validators>,
}

impl AllOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext) -> CompilationResult {
        if let Value::Array(items) = schema {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items {
                schemas.push(compile_validators(item, context)?)
            }
            return Ok(Box::new(AllOfValidator {
                original: schema.clone(),
                schemas,
            }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for AllOfValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        for validators in &self.schemas {
            for validator in validators {
                if let Err(error) = validator.validate(schema, instance) {
                    if error.is_resolution_failure() {
                        return Err(error);
                    }
                    return Err(ValidationError::does_not_match_all_of(
                        instance,
                        self.original.clone(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> String {
        format!("allOf: [{}]", format_vec_of_validators(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    Some(AllOfValidator::compile(schema, context))
}

#[cfg(test)]
mod tests {
    use crate::{tests_util, JSONSchema, ValidationErrorKind};
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"allOf": [{"type": "integer"}, {"minimum": 10}]}), json!(12))]
    #[test_case(json!({"allOf": [{}]}), json!("anything"))]
    fn valid(schema: Value, instance: Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(json!({"allOf": [{"type": "integer"}, {"minimum": 10}]}), json!(5))]
    #[test_case(json!({"allOf": [{"type": "integer"}, {"minimum": 10}]}), json!("x"))]
    fn invalid(schema: Value, instance: Value) {
        tests_util::is_not_valid(schema, instance)
    }

    #[test]
    fn reports_the_combinator_error() {
        let schema = json!({"allOf": [{"type": "integer"}, {"minimum": 10}]});
        let compiled = JSONSchema::compile(&schema, None).unwrap();
        let error = compiled.validate(&json!(5)).unwrap_err();
        match error.kind() {
            ValidationErrorKind::DoesNotMatchAllOf { schemas } => {
                assert_eq!(schemas, &json!([{"type": "integer"}, {"minimum": 10}]))
            }
            _ => panic!("Expected allOf error"),
        }
    }
}
