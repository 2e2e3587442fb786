use crate::{compilation::JSONSchema, error::ValidationError};
use serde_json::Value;
use std::fmt;

/// The result of a single validation step: `Ok(())` or the first error.
pub type ValidationResult = Result<(), ValidationError>;

/// A compiled validator node. Each keyword battery implements this trait;
/// the dispatcher runs the nodes in a fixed order and stops at the first
/// error.
pub trait Validate {
    /// Validate `instance` and return the first error, if any. `schema` is
    /// the compiled root, needed to resolve references lazily.
    fn validate(&self, schema: &JSONSchema, instance: &Value) -> ValidationResult;

    /// A boolean fast path. Validators override it when a cheaper check than
    /// building an error is possible.
    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        self.validate(schema, instance).is_ok()
    }

    /// Debug representation of the node.
    fn name(&self) -> String;
}

impl fmt::Debug for dyn Validate + Send + Sync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
