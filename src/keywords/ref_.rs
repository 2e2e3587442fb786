use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::ValidationError,
    keywords::{CompilationResult, Validators},
    validator::{Validate, ValidationResult},
};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use url::Url;

pub(crate) struct RefValidator {
    reference: Url,
    /// Precomputed validators.
    /// They are behind a RwLock as is not possible to compute them
    /// at compile time without risking infinite loops of references
    /// and at the same time during validation we iterate over shared
    /// references (&self) and not owned references (&mut self).
    validators: RwLock<Option<Validators>>,
}

impl RefValidator {
    #[inline]
    pub(crate) fn compile(reference: &str, context: &CompilationContext) -> CompilationResult {
        let reference = context.build_url(reference)?;
        Ok(Box::new(RefValidator {
            reference,
            validators: RwLock::new(None),
        }))
    }

    /// Ensure that validators are built and built once. The resolved scope
    /// becomes the compilation scope of the target, so references inside an
    /// externally loaded document stay relative to that document.
    fn ensure_validators(&self, schema: &JSONSchema) -> Result<(), ValidationError> {
        if self.validators.read().is_none() {
            let (resolved, scope) = schema.resolver.resolve_fragment(&self.reference)?;
            let context = CompilationContext::new(scope, schema.draft);
            let validators = compile_validators(&resolved, &context)
                .map_err(|_| ValidationError::unresolvable_ref(self.reference.to_string()))?;

            // Inject the validators into self.validators
            *self.validators.write() = Some(validators);
        }
        Ok(())
    }
}

impl Validate for RefValidator {
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult {
        self.ensure_validators(schema)?;
        let validators = self.validators.read();
        for validator in validators
            .as_ref()
            .expect("ensure_validators guarantees the presence of the validators")
        {
            validator.validate(schema, instance)?
        }
        Ok(())
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        if self.ensure_validators(schema).is_err() {
            return false;
        }
        self.validators
            .read()
            .as_ref()
            .expect("ensure_validators guarantees the presence of the validators")
            .iter()
            .all(|validator| validator.is_valid(schema, instance))
    }

    fn name(&self) -> String {
        format!("$ref: {}", self.reference)
    }
}

#[inline]
pub(crate) fn compile(
    _: &Map<String, Value>,
    reference: &str,
    context: &CompilationContext,
) -> Option<CompilationResult> {
    Some(RefValidator::compile(reference, context))
}
