//! # jsonvalid
//!
//! A crate for validating JSON documents against JSON Schema drafts 3 and 4.
//! A schema is compiled into a validation tree once and can then be run against
//! any number of instances; validation stops at the first violation and returns
//! it as a structured error value.
//!
//! Supports:
//!   - JSON Schema drafts 3 and 4 (type, enum, numeric bounds, string checks,
//!     object and array checks, `allOf` / `anyOf` / `not`, `dependencies`);
//!   - `$ref` resolution via JSON Pointers and external documents loaded
//!     through a pluggable resolver (filesystem by default, HTTP(S) with the
//!     `reqwest` feature);
//!
//! ## Example:
//!
//! ```rust
//! use jsonvalid::{JSONSchema, CompilationError};
//! use serde_json::json;
//!
//! fn main() -> Result<(), CompilationError> {
//!     let schema = json!({"maxLength": 5});
//!     let instance = json!("foo");
//!     let compiled = JSONSchema::compile(&schema, None)?;
//!     let result = compiled.validate(&instance);
//!     if let Err(error) = result {
//!         println!("Validation error: {}", error)
//!     }
//!     Ok(())
//! }
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    clippy::trivially_copy_pass_by_ref,
    clippy::needless_pass_by_value,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]
mod compilation;
mod error;
mod helpers;
mod keywords;
mod primitive_type;
mod resolver;
mod schemas;
mod validator;
pub use compilation::config::CompilationConfig;
pub use compilation::JSONSchema;
pub use error::{CompilationError, Limit, TypeKind, ValidationError, ValidationErrorKind};
pub use primitive_type::PrimitiveType;
pub use resolver::{DefaultResolver, SchemaResolver};
pub use schemas::Draft;
pub use validator::ValidationResult;
use serde_json::Value;

/// A shortcut for validating `instance` against `schema`. Draft version is detected automatically.
/// ```rust
/// use jsonvalid::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// This function panics if an invalid schema is passed.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = JSONSchema::compile(schema, None).expect("Invalid schema");
    compiled.is_valid(instance)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_valid() {
        let schema = json!({"minLength": 5});
        let valid = json!("foobar");
        let invalid = json!("foo");
        assert!(is_valid(&schema, &valid));
        assert!(!is_valid(&schema, &invalid));
    }

    #[test]
    fn empty_schema_accepts_everything() {
        let schema = json!({});
        for instance in &[
            json!(null),
            json!(true),
            json!(1),
            json!(2.5),
            json!("abc"),
            json!([1, 2]),
            json!({"a": 1}),
        ] {
            assert!(is_valid(&schema, instance));
        }
    }
}
