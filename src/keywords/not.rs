use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::{format_validators, CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

/// Fails when the negated sub-schema succeeds.
pub(crate) struct NotValidator {
    // needed only for error representation
    original: Value,
    validators: Validators,
}

impl NotValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext) -> CompilationResult {
        if schema.is_object() {
            return Ok(Box::new(NotValidator {
                original: schema.clone(),
                validators: compile_validators(schema, context)?,
            }));
        }
        Err(CompilationError::SchemaError)
    }
}

impl Validate for NotValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        for validator in &self.validators {
            if let Err(error) = validator.validate(schema, instance) {
                if error.is_resolution_failure() {
                    return Err(error);
                }
                // The sub-schema failed, so the negation holds
                return Ok(());
            }
        }
        Err(ValidationError::should_not_match(
            instance,
            self.original.clone(),
        ))
    }

    fn name(&self) -> String {
        format!("not: {}", format_validators(&self.validators))
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    Some(NotValidator::compile(schema, context))
}
