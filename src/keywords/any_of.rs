use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::{format_vec_of_validators, CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

/// Fails only when every sub-schema fails.
pub(crate) struct AnyOfValidator {
    original: Value,
    schemas: Vec<Validators>,
}

impl AnyOfValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext) -> CompilationResult {
        if let Value::Array(items) = schema {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items {
                schemas.push(compile_validators(item, context)?)
            }
            return Ok(Box::new(AnyOfValidator {
                original: schema.clone(),
                schemas,
            }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for AnyOfValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        for validators in &self.schemas {
            let mut matched = true;
            for validator in validators {
                if let Err(error) = validator.validate(schema, instance) {
                    if error.is_resolution_failure() {
                        return Err(error);
                    }
                    matched = false;
                    break;
                }
            }
            if matched {
                return Ok(());
            }
        }
        Err(ValidationError::does_not_match_any_of(
            instance,
            self.original.clone(),
        ))
    }

    fn name(&self) -> String {
        format!("anyOf: [{}]", format_vec_of_validators(&self.schemas))
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    Some(AnyOfValidator::compile(schema, context))
}
