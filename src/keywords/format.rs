//! Validator for `format` keyword.
use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use chrono::DateTime;
use serde_json::{Map, Value};

struct DateTimeValidator {}

impl DateTimeValidator {
    #[inline]
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(DateTimeValidator {}))
    }
}

impl Validate for DateTimeValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::format(instance, "date-time"))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::String(item) = instance {
            DateTime::parse_from_rfc3339(item).is_ok()
        } else {
            true
        }
    }

    fn name(&self) -> String {
        "format: date-time".to_string()
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    if let Value::String(format) = schema {
        match format.as_str() {
            "date-time" => Some(DateTimeValidator::compile()),
            _ => {
                // Unsupported formats never fail validation, they are only
                // reported to the diagnostic sink
                eprintln!("Unsupported format: {}", format);
                None
            }
        }
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}
