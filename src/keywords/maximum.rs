use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, Limit, ValidationError},
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use num_cmp::NumCmp;
use serde_json::{Map, Value};

/// The upper numeric bound. With `exclusiveMaximum: true` on the enclosing
/// schema the bound is strict.
pub(crate) struct MaximumValidator {
    limit: f64,
    exclusive: bool,
}

impl MaximumValidator {
    #[inline]
    pub(crate) fn compile(limit: f64, exclusive: bool) -> CompilationResult {
        Ok(Box::new(MaximumValidator { limit, exclusive }))
    }
}

impl Validate for MaximumValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::out_of_bounds(
                instance,
                self.limit,
                self.exclusive,
                Limit::Maximum,
            ))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Number(number) = instance {
            if let Some(value) = number.as_u64() {
                if self.exclusive {
                    NumCmp::num_lt(value, self.limit)
                } else {
                    NumCmp::num_le(value, self.limit)
                }
            } else if let Some(value) = number.as_i64() {
                if self.exclusive {
                    NumCmp::num_lt(value, self.limit)
                } else {
                    NumCmp::num_le(value, self.limit)
                }
            } else {
                let value = number.as_f64().expect("Always valid");
                if self.exclusive {
                    value < self.limit
                } else {
                    value <= self.limit
                }
            }
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("maximum: {}", self.limit)
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
        let exclusive = matches!(parent.get("exclusiveMaximum"), Some(Value::Bool(true)));
        Some(MaximumValidator::compile(limit, exclusive))
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}
