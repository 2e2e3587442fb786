use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, Limit, ValidationError},
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

pub(crate) struct MaxItemsValidator {
    limit: u64,
}

impl MaxItemsValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value) -> CompilationResult {
        if let Some(limit) = schema.as_u64() {
            return Ok(Box::new(MaxItemsValidator { limit }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for MaxItemsValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Array(items) = instance {
            if !self.is_valid(schema, instance) {
                return Err(ValidationError::wrong_number_of_elements(
                    instance,
                    self.limit,
                    items.len(),
                    Limit::Maximum,
                ));
            }
        }
        Ok(())
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Array(items) = instance {
            items.len() as u64 <= self.limit
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("maxItems: {}", self.limit)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    Some(MaxItemsValidator::compile(schema))
}
