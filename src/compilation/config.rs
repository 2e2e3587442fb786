use crate::{
    resolver::{DefaultResolver, SchemaResolver},
    schemas,
};
use serde_json::Value;
use std::fmt;

/// Configuration for schema compilation: the draft selection and the
/// external reference resolver.
#[derive(Default)]
pub struct CompilationConfig {
    pub(crate) draft: Option<schemas::Draft>,
    pub(crate) resolver: Option<Box<dyn SchemaResolver>>,
}

impl fmt::Debug for CompilationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilationConfig")
            .field("draft", &self.draft)
            .field("resolver", &self.resolver.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

impl CompilationConfig {
    pub(crate) fn draft(&self) -> schemas::Draft {
        self.draft
            .expect("JSONSchema::compile should have defined a specific draft version.")
    }

    pub(crate) fn set_draft_if_missing(&mut self, schema: &Value) -> &mut Self {
        if self.draft.is_none() {
            self.draft =
                Some(schemas::draft_from_schema(schema).unwrap_or(schemas::Draft::Draft4));
        }
        self
    }

    /// Select the draft explicitly instead of detecting it from `$schema`.
    /// `Draft::Draft3` switches `required` collection to the per-property
    /// boolean form.
    pub fn set_draft(&mut self, draft: schemas::Draft) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    /// Override the external schema fetcher used for URI references.
    pub fn set_resolver(&mut self, resolver: Box<dyn SchemaResolver>) -> &mut Self {
        self.resolver = Some(resolver);
        self
    }

    pub(crate) fn take_resolver(&mut self) -> Box<dyn SchemaResolver> {
        self.resolver
            .take()
            .unwrap_or_else(|| Box::new(DefaultResolver))
    }
}
