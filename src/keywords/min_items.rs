use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, Limit, ValidationError},
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

pub(crate) struct MinItemsValidator {
    limit: u64,
}

impl MinItemsValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Some(limit) = schema.as_u64() {
            return Ok(Box::new(MinItemsValidator { limit }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for MinItemsValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Array(items) = instance {
            if !self.is_valid(schema, instance) {
                return Err(ValidationError::wrong_number_of_elements(
                    instance,
                    self.limit,
                    items.len(),
                    Limit::Minimum,
                ));
            }
        }
        Ok(())
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.len() as u64 >= self.limit
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("minItems: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    Some(MinItemsValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"minItems": 2}), json!([1, 2]); "limit is inclusive")]
    #[test_case(json!({"minItems": 0}), json!([]))]
    fn valid(schema: Value, instance: Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(json!({"minItems": 2}), json!([1]))]
    #[test_case(json!({"minItems": 1}), json!([]))]
    fn invalid(schema: Value, instance: Value) {
        tests_util::is_not_valid(schema, instance)
    }
}
