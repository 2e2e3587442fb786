use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::{format_key_value_validators, CompilationResult, Validators},
    schemas::Draft,
    validator::{Validate, ValidationResult},
};
use regex::Regex;
use serde_json::{Map, Value};

/// The object battery: required presence, declared properties and pattern
/// properties are checked together and their violations are collected into
/// one `properties` error keyed by property name (or pattern), in schema
/// declaration order.
///
/// Compiled from `properties`, `patternProperties` and the draft's required
/// form; any of the three keywords triggers compilation, the later triggers
/// defer to the earliest one present.
pub(crate) struct ObjectValidator {
    required: Vec<String>,
    properties: Vec<(String, Validators)>,
    patterns: Vec<(String, Regex, Validators)>,
}

impl ObjectValidator {
    pub(crate) fn compile(
        parent: &Map<String, Value>,
        context: &CompilationContext,
    ) -> CompilationResult {
        let mut required = Vec::new();
        let mut properties = Vec::new();
        if let Some(subschemas) = parent.get("properties") {
            match subschemas {
                Value::Object(map) => {
                    for (key, subschema) in map {
                        // Draft 3 marks required properties inside the
                        // property schema itself
                        if context.draft == Draft::Draft3 {
                            if let Some(Value::Bool(true)) = subschema.get("required") {
                                required.push(key.clone());
                            }
                        }
                        properties.push((key.clone(), compile_validators(subschema, context)?));
                    }
                }
                _ => return Err(CompilationError::SchemaError),
            }
        }
        if context.draft == Draft::Draft4 {
            if let Some(names) = parent.get("required") {
                match names {
                    Value::Array(items) => {
                        for item in items {
                            match item {
                                Value::String(string) => required.push(string.clone()),
                                _ => return Err(CompilationError::SchemaError),
                            }
                        }
                    }
                    _ => return Err(CompilationError::SchemaError),
                }
            }
        }
        let mut patterns = Vec::new();
        if let Some(subschemas) = parent.get("patternProperties") {
            match subschemas {
                Value::Object(map) => {
                    for (pattern, subschema) in map {
                        patterns.push((
                            pattern.clone(),
                            Regex::new(pattern)?,
                            compile_validators(subschema, context)?,
                        ));
                    }
                }
                _ => return Err(CompilationError::SchemaError),
            }
        }
        Ok(Box::new(ObjectValidator {
            required,
            properties,
            patterns,
        }))
    }
}

impl Validate for ObjectValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Object(item) = instance {
            let mut errors: Vec<(String, ValidationError)> = Vec::new();
            for name in &self.required {
                if !item.contains_key(name) {
                    errors.push((name.clone(), ValidationError::missing_property()));
                }
            }
            for (name, validators) in &self.properties {
                if let Some(value) = item.get(name) {
                    // A null value counts as absent here; presence is the
                    // required check's job
                    if value.is_null() {
                        continue;
                    }
                    for validator in validators {
                        if let Err(error) = validator.validate(schema, value) {
                            if error.is_resolution_failure() {
                                return Err(error);
                            }
                            errors.push((name.clone(), error));
                            break;
                        }
                    }
                }
            }
            for (pattern, regex, validators) in &self.patterns {
                let mut failing = Vec::new();
                for (key, value) in item {
                    if regex.is_match(key) {
                        for validator in validators {
                            if let Err(error) = validator.validate(schema, value) {
                                if error.is_resolution_failure() {
                                    return Err(error);
                                }
                                failing.push(key.clone());
                                break;
                            }
                        }
                    }
                }
                if !failing.is_empty() {
                    errors.push((
                        pattern.clone(),
                        ValidationError::invalid_pattern_properties(pattern.clone(), failing),
                    ));
                }
            }
            if !errors.is_empty() {
                return Err(ValidationError::properties(instance, errors));
            }
        }
        Ok(())
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.required.iter().all(|name| item.contains_key(name))
                && self.properties.iter().all(|(name, validators)| {
                    item.get(name)
                        .filter(|value| !value.is_null())
                        .into_iter()
                        .all(|value| {
                            validators
                                .iter()
                                .all(|validator| validator.is_valid(schema, value))
                        })
                })
                && self.patterns.iter().all(|(_, regex, validators)| {
                    item.iter()
                        .filter(|(key, _)| regex.is_match(key))
                        .all(|(_, value)| {
                            validators
                                .iter()
                                .all(|validator| validator.is_valid(schema, value))
                        })
                })
        } else {
            true
        }
    }

    fn name(&self) -> String {
        if self.properties.is_empty() && self.patterns.is_empty() {
            format!("required: [{}]", self.required.join(", "))
        } else {
            format!(
                "properties: {{{}}}",
                format_key_value_validators(&self.properties)
            )
        }
    }
}

#[inline]
pub(crate) fn compile(
    parent: &Map<String, Value>,
    _: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    Some(ObjectValidator::compile(parent, context))
}

/// `patternProperties` trigger: defers when the `properties` trigger already
/// compiled the battery.
#[inline]
pub(crate) fn compile_patterns(
    parent: &Map<String, Value>,
    _: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    if parent.contains_key("properties") {
        None
    } else {
        Some(ObjectValidator::compile(parent, context))
    }
}

/// `required` trigger: defers when an earlier trigger already compiled the
/// battery.
#[inline]
pub(crate) fn compile_required(
    parent: &Map<String, Value>,
    _: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    if parent.contains_key("properties") || parent.contains_key("patternProperties") {
        None
    } else {
        Some(ObjectValidator::compile(parent, context))
    }
}
