//! Schema compilation.
//! The main idea is to compile the input JSON Schema to a validators tree that will contain
//! everything needed to perform such validation in runtime.
pub(crate) mod config;
pub(crate) mod context;

use crate::{
    error::CompilationError,
    keywords,
    keywords::Validators,
    resolver::Resolver,
    schemas::{Draft, VALIDATION_ORDER},
    validator::ValidationResult,
};
use config::CompilationConfig;
use context::CompilationContext;
use serde_json::Value;
use url::Url;

pub(crate) const DEFAULT_ROOT_URL: &str = "json-schema:///";

lazy_static::lazy_static! {
    pub(crate) static ref DEFAULT_SCOPE: Url = Url::parse(DEFAULT_ROOT_URL).expect("Is a valid URL");
}

/// The structure that holds a JSON Schema compiled into a validation tree.
#[derive(Debug)]
pub struct JSONSchema<'a> {
    pub(crate) draft: Draft,
    pub(crate) validators: Validators,
    pub(crate) resolver: Resolver<'a>,
}

impl<'a> JSONSchema<'a> {
    /// Compile the input schema into a validation tree.
    ///
    /// The draft is detected in the following precedence order:
    ///   - explicitly specified in `config`;
    ///   - the `$schema` field of the document;
    ///   - Draft 4.
    pub fn compile(
        schema: &'a Value,
        config: Option<CompilationConfig>,
    ) -> Result<JSONSchema<'a>, CompilationError> {
        let mut config = config.unwrap_or_default();
        config.set_draft_if_missing(schema);
        let draft = config.draft();

        let resolver = Resolver::new(schema, config.take_resolver());
        let context = CompilationContext::new(DEFAULT_SCOPE.clone(), draft);

        let mut validators = compile_validators(schema, &context)?;
        validators.shrink_to_fit();

        Ok(JSONSchema {
            draft,
            validators,
            resolver,
        })
    }

    /// Run validation against `instance` and return the first violation as a
    /// structured error. Resolution failures abort validation regardless of
    /// where they occur.
    #[inline]
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        for validator in &self.validators {
            validator.validate(self, instance)?
        }
        Ok(())
    }

    /// Run validation against `instance` but return a boolean result instead of an error.
    /// It is useful for cases, where it is important to only know the fact if the data is valid or not.
    #[must_use]
    #[inline]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validators
            .iter()
            .all(|validator| validator.is_valid(self, instance))
    }
}

/// Compile a JSON schema node into a vector of validators, ordered by the
/// fixed validation battery. A `$ref` node compiles into the reference
/// validator alone: the reference overrides its siblings.
pub(crate) fn compile_validators(
    schema: &Value,
    context: &CompilationContext,
) -> Result<Validators, CompilationError> {
    match schema {
        Value::Object(object) => {
            if let Some(reference) = object.get("$ref") {
                if let Value::String(reference) = reference {
                    Ok(vec![keywords::ref_::compile(object, reference, context)
                        .expect("Always returns Some")?])
                } else {
                    Err(CompilationError::SchemaError)
                }
            } else {
                let mut validators = Vec::with_capacity(object.len());
                for keyword in VALIDATION_ORDER {
                    if let Some(subschema) = object.get(*keyword) {
                        if let Some(compilation_func) = context.draft.get_validator(*keyword) {
                            if let Some(validator) = compilation_func(object, subschema, context) {
                                validators.push(validator?)
                            }
                        }
                    }
                }
                Ok(validators)
            }
        }
        // Drafts 3 and 4 have no boolean schema form; a schema is a mapping.
        _ => Err(CompilationError::SchemaError),
    }
}
