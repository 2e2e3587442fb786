use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::CompilationResult,
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};
use std::f64::EPSILON;

/// Divisor with a fractional part. The quotient is compared against its
/// nearest integer within a quotient-scaled tolerance, so values like `0.3`
/// pass a `0.1` divisor despite the binary representation drift.
pub(crate) struct MultipleOfFloatValidator {
    multiple_of: f64,
}

impl MultipleOfFloatValidator {
    #[inline]
    pub(crate) fn compile(multiple_of: f64) -> CompilationResult {
        Ok(Box::new(MultipleOfFloatValidator { multiple_of }))
    }
}

fn is_multiple_of_float(value: f64, multiple_of: f64) -> bool {
    let quotient = value / multiple_of;
    (quotient - quotient.round()).abs() <= EPSILON * quotient.abs().max(1.)
}

impl Validate for MultipleOfFloatValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::not_multiple_of(instance, self.multiple_of))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Some(value) = instance.as_f64() {
            is_multiple_of_float(value, self.multiple_of)
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("multipleOf: {}", self.multiple_of)
    }
}

/// Integral divisor. Integral values are checked exactly, fractional ones
/// fall back to the tolerance check.
pub(crate) struct MultipleOfIntegerValidator {
    multiple_of: f64,
}

impl MultipleOfIntegerValidator {
    #[inline]
    pub(crate) fn compile(multiple_of: f64) -> CompilationResult {
        Ok(Box::new(MultipleOfIntegerValidator { multiple_of }))
    }
}

impl Validate for MultipleOfIntegerValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::not_multiple_of(instance, self.multiple_of))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Some(value) = instance.as_f64() {
            if value.fract() == 0. {
                (value % self.multiple_of) == 0.
            } else {
                is_multiple_of_float(value, self.multiple_of)
            }
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!("multipleOf: {}", self.multiple_of)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    if let Value::Number(multiple_of) = schema {
        let multiple_of = multiple_of.as_f64().expect("Always valid");
        // The divisor must be a positive number
        if multiple_of <= 0. {
            return Some(Err(CompilationError::SchemaError));
        }
        if multiple_of.fract() == 0. {
            Some(MultipleOfIntegerValidator::compile(multiple_of))
        } else {
            Some(MultipleOfFloatValidator::compile(multiple_of))
        }
    } else {
        Some(Err(CompilationError::SchemaError))
    }
}
