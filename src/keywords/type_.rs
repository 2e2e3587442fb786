use crate::{
    compilation::{context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::CompilationResult,
    primitive_type::PrimitiveType,
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};
use std::convert::TryFrom;

pub(crate) struct MultipleTypesValidator {
    types: Vec<PrimitiveType>,
}

impl MultipleTypesValidator {
    #[inline]
    pub(crate) fn compile(items: &[Value]) -> CompilationResult {
        let mut types = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(string) => match PrimitiveType::try_from(string.as_str()) {
                    Ok(primitive_type) => types.push(primitive_type),
                    Err(()) => return Err(CompilationError::SchemaError),
                },
                _ => return Err(CompilationError::SchemaError),
            }
        }
        Ok(Box::new(MultipleTypesValidator { types }))
    }
}

impl Validate for MultipleTypesValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::multiple_type_error(
                instance,
                self.types.clone(),
            ))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        self.types
            .iter()
            .any(|type_| matches_type(*type_, instance))
    }

    fn name(&self) -> String {
        format!(
            "type: [{}]",
            self.types
                .iter()
                .map(|type_| format!("{}", type_))
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

pub(crate) struct SingleTypeValidator {
    type_: PrimitiveType,
}

impl SingleTypeValidator {
    #[inline]
    pub(crate) fn compile(type_: PrimitiveType) -> CompilationResult {
        Ok(Box::new(SingleTypeValidator { type_ }))
    }
}

impl Validate for SingleTypeValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if self.is_valid(schema, instance) {
            Ok(())
        } else {
            Err(ValidationError::single_type_error(instance, self.type_))
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        matches_type(self.type_, instance)
    }

    fn name(&self) -> String {
        format!("type: {}", self.type_)
    }
}

fn matches_type(type_: PrimitiveType, instance: &Value) -> bool {
    match type_ {
        PrimitiveType::Array => instance.is_array(),
        PrimitiveType::Boolean => instance.is_boolean(),
        PrimitiveType::Null => instance.is_null(),
        PrimitiveType::Number => instance.is_number(),
        PrimitiveType::Object => instance.is_object(),
        PrimitiveType::String => instance.is_string(),
        // An integral numeric value of any width, including floats with a
        // zero fractional part
        PrimitiveType::Integer => match instance {
            Value::Number(number) => {
                number.is_u64()
                    || number.is_i64()
                    || number.as_f64().map_or(false, |value| value.fract() == 0.)
            }
            _ => false,
        },
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &CompilationContext,
) -> Option<CompilationResult> {
    match schema {
        Value::String(item) => compile_single_type(item.as_str()),
        Value::Array(items) => {
            if items.len() == 1 {
                if let Some(Value::String(item)) = items.iter().next() {
                    compile_single_type(item.as_str())
                } else {
                    Some(Err(CompilationError::SchemaError))
                }
            } else {
                Some(MultipleTypesValidator::compile(items))
            }
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

fn compile_single_type(item: &str) -> Option<CompilationResult> {
    match PrimitiveType::try_from(item) {
        Ok(type_) => Some(SingleTypeValidator::compile(type_)),
        Err(()) => Some(Err(CompilationError::SchemaError)),
    }
}
