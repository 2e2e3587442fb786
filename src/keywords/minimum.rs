use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, Limit, ValidationError},
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use num_cmp::NumCmp;
use serde_json::{Map, Value};

/// The lower numeric bound. With `exclusiveMinimum: true` on the enclosing
/// schema the bound is strict.
pub(crate) struct MinimumValidator {
    limit: f64,
    exclusive: bool,
}

impl MinimumValidator {
    #[inline]
    pub(crate) fn compile(limit: f64, exclusive: bool) -> CompilationResult {
        Ok(Box::new(MinimumValidator { limit, exclusive }))
    }
}

impl Validate for MinimumValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::out_of_bounds(
                instance,
                self.limit,
                self.exclusive,
                Limit::Minimum,
            ))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Number(number) = instance {
            // Compare in the instance's own width to avoid lossy casts
            if let Some(value) = number.as_u64() {
                if self.exclusive {
                    NumCmp::num_gt(value, self.limit)
                } else {
                    NumCmp::num_ge(value, self.limit)
                }
            } else if let Some(value) = number.as_i64() {
                if self.exclusive {
                    NumCmp::num_gt(value, self.limit)
                } else {
                    NumCmp::num_ge(value, self.limit)
                }
            } else {
                let value = number.as_f64().expect("Always valid");
                if self.exclusive {
                    value > self.limit
                } else {
                    value >= self.limit
                }
            }
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("minimum: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    parent: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    if let Value::Number(limit) = schema {
        let limit = limit.as_f64().expect("Always valid");
        // "exclusiveMinimum", if absent, may be considered as being present
        // with boolean value false
        let exclusive = matches!(parent.get("exclusiveMinimum"), Some(Value::Bool(true)));
        Some(MinimumValidator::compile(limit, exclusive))
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"minimum": 3}), json!(3); "inclusive by default")]
    #[test_case(json!({"minimum": 3}), json!(4))]
    #[test_case(json!({"minimum": 1.1}), json!(1.2))]
    #[test_case(json!({"minimum": 3, "exclusiveMinimum": false}), json!(3))]
    fn valid(schema: Value, instance: Value) {
        tests_util::is_valid(schema, instance)
    }

    #[test_case(json!({"minimum": 3}), json!(2))]
    #[test_case(json!({"minimum": 3, "exclusiveMinimum": true}), json!(3))]
    #[test_case(json!({"minimum": 1.1}), json!(1))]
    #[test_case(json!({"minimum": 0}), json!(-1))]
    fn invalid(schema: Value, instance: Value) {
        tests_util::is_not_valid(schema, instance)
    }
}
