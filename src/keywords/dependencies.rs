use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{CompilationError, ValidationError},
    keywords::{CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use serde_json::{Map, Value};

enum Dependency {
    /// Every listed property must also be present.
    Names(Vec<String>),
    /// The whole instance must validate against the schema.
    Schema(Validators),
}

pub(crate) struct DependenciesValidator {
    dependencies: Vec<(String, Value, Dependency)>,
}

impl DependenciesValidator {
    #[inline]
    pub(crate) fn compile(schema: &Value, context: &CompilationContext) -> CompilationResult {
        match schema.as_object() {
            Some(map) => {
                let mut dependencies = Vec::with_capacity(map.len());
                for (key, subschema) in map {
                    let dependency = match subschema {
                        Value::Array(items) => {
                            let mut names = Vec::with_capacity(items.len());
                            for item in items {
                                match item {
                                    Value::String(string) => names.push(string.clone()),
                                    _ => return Err(CompilationError::SchemaError),
                                }
                            }
                            Dependency::Names(names)
                        }
                        Value::Object(_) => {
                            Dependency::Schema(compile_validators(subschema, context)?)
                        }
                        _ => return Err(CompilationError::SchemaError),
                    };
                    dependencies.push((key.clone(), subschema.clone(), dependency))
                }
                Ok(Box::new(DependenciesValidator { dependencies }))
            }
            None => Err(CompilationError::SchemaError),
        }
    }
}

impl Validate for DependenciesValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        if let Value::Object(item) = instance {
            for (property, original, dependency) in &self.dependencies {
                if !item.contains_key(property) {
                    continue;
                }
                let satisfied = match dependency {
                    Dependency::Names(names) => {
                        names.iter().all(|name| item.contains_key(name))
                    }
                    Dependency::Schema(validators) => {
                        for validator in validators {
                            if let Err(error) = validator.validate(schema, instance) {
                                if error.is_resolution_failure() {
                                    return Err(error);
                                }
                                return Err(ValidationError::dependency_mismatch(
                                    instance,
                                    property.clone(),
                                    original.clone(),
                                ));
                            }
                        }
                        true
                    }
                };
                if !satisfied {
                    return Err(ValidationError::dependency_mismatch(
                        instance,
                        property.clone(),
                        original.clone(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        if let Value::Object(item) = instance {
            self.dependencies
                .iter()
                .filter(|(property, _, _)| item.contains_key(property))
                .all(|(_, _, dependency)| match dependency {
                    Dependency::Names(names) => {
                        names.iter().all(|name| item.contains_key(name))
                    }
                    Dependency::Schema(validators) => validators
                        .iter()
                        .all(|validator| validator.is_valid(schema, instance)),
                })
        } else {
            true
        }
    }

    fn name(&self) -> String {
        format!(
            "dependencies: [{}]",
            self.dependencies
                .iter()
                .map(|(property, _, _)| property.clone())
                .collect::<Vec<String>>()
                .join(", ")
        )
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    Some(DependenciesValidator::compile(schema, context))
}
