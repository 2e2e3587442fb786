use crate::{compilation::context::CompilationContext, keywords};
use serde_json::{Map, Value};

/// Supported JSON Schema draft versions. The drafts share every keyword this
/// engine knows about except `required`: draft 4 keeps an array of names on
/// the object schema, draft 3 keeps a boolean marker inside each property
/// schema.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Draft {
    /// Draft 3: `required` is a boolean inside each property schema.
    Draft3,
    /// Draft 4: `required` is an array of names on the object schema.
    Draft4,
}

type CompileFunc =
    fn(&Map<String, Value>, &Value, &CompilationContext) -> Option<keywords::CompilationResult>;

/// Keywords in the order the dispatcher runs them: wrappers first, then the
/// cheap shape checks, then the recursing object and array batteries.
/// `patternProperties` and `required` are alternate triggers for the object
/// battery and compile to nothing when an earlier trigger already built it.
pub(crate) const VALIDATION_ORDER: &[&str] = &[
    "not",
    "allOf",
    "anyOf",
    "dependencies",
    "type",
    "enum",
    "minimum",
    "maximum",
    "multipleOf",
    "minLength",
    "maxLength",
    "pattern",
    "format",
    "properties",
    "patternProperties",
    "required",
    "additionalProperties",
    "minProperties",
    "maxProperties",
    "items",
    "minItems",
    "maxItems",
    "uniqueItems",
];

impl Draft {
    pub(crate) fn get_validator(self, keyword: &str) -> Option<CompileFunc> {
        match self {
            Draft::Draft4 => match keyword {
                "additionalProperties" => Some(keywords::additional_properties::compile),
                "allOf" => Some(keywords::all_of::compile),
                "anyOf" => Some(keywords::any_of::compile),
                "dependencies" => Some(keywords::dependencies::compile),
                "enum" => Some(keywords::enum_::compile),
                "format" => Some(keywords::format::compile),
                "items" => Some(keywords::items::compile),
                "maximum" => Some(keywords::maximum::compile),
                "maxItems" => Some(keywords::max_items::compile),
                "maxLength" => Some(keywords::max_length::compile),
                "maxProperties" => Some(keywords::max_properties::compile),
                "minimum" => Some(keywords::minimum::compile),
                "minItems" => Some(keywords::min_items::compile),
                "minLength" => Some(keywords::min_length::compile),
                "minProperties" => Some(keywords::min_properties::compile),
                "multipleOf" => Some(keywords::multiple_of::compile),
                "not" => Some(keywords::not::compile),
                "pattern" => Some(keywords::pattern::compile),
                "patternProperties" => Some(keywords::properties::compile_patterns),
                "properties" => Some(keywords::properties::compile),
                "required" => Some(keywords::properties::compile_required),
                "type" => Some(keywords::type_::compile),
                "uniqueItems" => Some(keywords::unique_items::compile),
                _ => None,
            },
            Draft::Draft3 => match keyword {
                "additionalProperties" => Some(keywords::additional_properties::compile),
                "allOf" => Some(keywords::all_of::compile),
                "anyOf" => Some(keywords::any_of::compile),
                "dependencies" => Some(keywords::dependencies::compile),
                "enum" => Some(keywords::enum_::compile),
                "format" => Some(keywords::format::compile),
                "items" => Some(keywords::items::compile),
                "maximum" => Some(keywords::maximum::compile),
                "maxItems" => Some(keywords::max_items::compile),
                "maxLength" => Some(keywords::max_length::compile),
                "maxProperties" => Some(keywords::max_properties::compile),
                "minimum" => Some(keywords::minimum::compile),
                "minItems" => Some(keywords::min_items::compile),
                "minLength" => Some(keywords::min_length::compile),
                "minProperties" => Some(keywords::min_properties::compile),
                "multipleOf" => Some(keywords::multiple_of::compile),
                "not" => Some(keywords::not::compile),
                "pattern" => Some(keywords::pattern::compile),
                "patternProperties" => Some(keywords::properties::compile_patterns),
                "properties" => Some(keywords::properties::compile),
                "type" => Some(keywords::type_::compile),
                "uniqueItems" => Some(keywords::unique_items::compile),
                _ => None,
            },
        }
    }
}

/// Get the `Draft` from a JSON Schema URL.
pub fn draft_from_url(url: &str) -> Option<Draft> {
    match url {
        "http://json-schema.org/draft-04/schema#" => Some(Draft::Draft4),
        "http://json-schema.org/draft-03/schema#" => Some(Draft::Draft3),
        _ => None,
    }
}

/// Get the `Draft` from a JSON Schema.
pub fn draft_from_schema(schema: &Value) -> Option<Draft> {
    schema
        .as_object()
        .and_then(|x| x.get("$schema"))
        .and_then(Value::as_str)
        .and_then(draft_from_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(json!({"$schema": "http://json-schema.org/draft-04/schema#"}), Some(Draft::Draft4))]
    #[test_case(json!({"$schema": "http://json-schema.org/draft-03/schema#"}), Some(Draft::Draft3))]
    #[test_case(json!({"$schema": "http://example.com/custom/schema#"}), None)]
    #[test_case(json!({}), None)]
    fn test_draft_from_schema(schema: Value, draft: Option<Draft>) {
        assert_eq!(draft_from_schema(&schema), draft)
    }
}
