use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    helpers,
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

/// An instance validates successfully against this keyword if its value is
/// structurally equal to one of the elements in the keyword's array value.
pub(crate) struct EnumValidator {
    options: Value,
    items: Vec<Value>,
}

impl EnumValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Value::Array(items) = schema {
            return Ok(Box::new(EnumValidator {
                options: schema.clone(),
                items: items.clone(),
            }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for EnumValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::invalid_enum_value(instance, &self.options))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        self.items.iter().any(|item| helpers::equal(item, instance))
    }

    fn name(&self) -> String {
        format!(
            "enum: [{}]",
            self.items
                .iter()
                .map(Value::to_string)
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    Some(EnumValidator::compile(schema))
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"enum": [1, 2, 3]}), json!(2))]
    #[test_case(json!({"enum": [1.0]}), json!(1); "numbers are compared by value")]
    #[test_case(json!({"enum": [[1, 2]]}), json!([1, 2]))]
    #[test_case(json!({"enum": [{"a": 1}]}), json!({"a": 1}))]
    #[test_case(json!({"enum": [null]}), json!(null))]
    fn valid(schema: Value, instance: Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(json!({"enum": [1, 2, 3]}), json!(4))]
    // A kind mismatch is rejected even without an explicit `type`
    #[test_case(json!({"enum": ["red", "green"]}), json!(1))]
    #[test_case(json!({"enum": [1, 2]}), json!("1"))]
    #[test_case(json!({"enum": [[1, 2]]}), json!([2, 1]))]
    fn invalid(schema: Value, instance: Value) {
        tests_util::is_not_valid(schema, instance)
    }
}
