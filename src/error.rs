use crate::primitive_type::PrimitiveType;
use serde_json::{json, Map, Value};
use std::{error, fmt};

/// An error that can occur during schema compilation.
#[derive(Debug, PartialEq)]
pub enum CompilationError {
    /// The schema (or a part of it) does not have the shape the keyword expects.
    SchemaError,
}

impl fmt::Display for CompilationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompilationError::SchemaError => write!(f, "Schema compilation error"),
        }
    }
}
impl error::Error for CompilationError {}

impl From<regex::Error> for CompilationError {
    fn from(_: regex::Error) -> Self {
        CompilationError::SchemaError
    }
}
impl From<url::ParseError> for CompilationError {
    fn from(_: url::ParseError) -> Self {
        CompilationError::SchemaError
    }
}

/// Whether a bound is the lower or the upper one. Shared by numeric,
/// property-count and item-count checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Limit {
    /// The lower bound.
    Minimum,
    /// The upper bound.
    Maximum,
}

/// Expected type(s) carried by a `wrong-type` error.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A single expected type.
    Single(PrimitiveType),
    /// A set of acceptable types.
    Multiple(Vec<PrimitiveType>),
}

/// An error that can occur during validation.
///
/// The error is a value: `kind` is the discriminated payload and `data` is
/// the offending part of the instance. [`ValidationError::to_value`] renders
/// the record as a JSON mapping with an `error` discriminant field.
#[derive(Debug)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    data: Value,
}

/// Kinds of errors that may happen during validation.
#[derive(Debug)]
pub enum ValidationErrorKind {
    /// The input value doesn't match the expected type(s).
    WrongType {
        /// The expected type or set of types.
        expected: TypeKind,
    },
    /// The input value doesn't match any of the allowed options.
    InvalidEnumValue {
        /// The allowed options.
        options: Value,
    },
    /// A numeric value violates its `minimum`/`maximum` bound.
    OutOfBounds {
        /// The violated bound.
        limit: f64,
        /// Whether the bound is strict.
        exclusive: bool,
        /// Which side the bound is on.
        bound: Limit,
    },
    /// A numeric value is not a multiple of the expected divisor.
    NotMultipleOf {
        /// The expected divisor.
        multiple_of: f64,
    },
    /// A string has fewer code points than `minLength`.
    StringTooShort {
        /// The minimal length.
        limit: u64,
    },
    /// A string has more code points than `maxLength`.
    StringTooLong {
        /// The maximal length.
        limit: u64,
    },
    /// A string doesn't match the expected pattern.
    StringDoesNotMatchPattern {
        /// The expected pattern.
        pattern: String,
    },
    /// A string doesn't conform to the expected format.
    WrongFormat {
        /// The expected format.
        format: String,
    },
    /// A required property is absent. Recorded inside a `Properties` map
    /// under the property name.
    MissingProperty,
    /// One or more properties of an object failed validation. The map keeps
    /// the schema declaration order.
    Properties {
        /// Per-key errors: missing required properties, failing declared
        /// properties and failing pattern batteries.
        properties: Vec<(String, ValidationError)>,
    },
    /// Values of keys matching a `patternProperties` regex failed validation.
    InvalidPatternProperties {
        /// The pattern whose battery failed.
        pattern: String,
        /// Names of the keys that failed.
        properties: Vec<String>,
    },
    /// Extra properties are present while `additionalProperties` is `false`.
    AdditionalProperties {
        /// The unexpected property names.
        property_names: Vec<String>,
    },
    /// Extra properties failed validation against the `additionalProperties`
    /// schema.
    InvalidAdditionalProperties {
        /// Per-key errors for the failing extra properties.
        properties: Vec<(String, ValidationError)>,
    },
    /// Not enough properties in an object.
    TooFewProperties {
        /// The minimal number of properties.
        limit: u64,
    },
    /// Too many properties in an object.
    TooManyProperties {
        /// The maximal number of properties.
        limit: u64,
    },
    /// One or more array elements failed validation against `items`.
    ArrayItems {
        /// Per-position errors, in element order.
        items: Vec<(usize, ValidationError)>,
    },
    /// The array length violates `minItems`/`maxItems`.
    WrongNumberOfElements {
        /// The violated length bound.
        limit: u64,
        /// The actual number of elements.
        actual: usize,
        /// Which side the bound is on.
        bound: Limit,
    },
    /// The input array has non-unique elements.
    DuplicateItems {
        /// The values that occur more than once.
        duplicates: Vec<Value>,
    },
    /// A `dependencies` entry is not satisfied.
    DependencyMismatch {
        /// The property that triggered the dependency.
        property: String,
        /// The dependency specification (a list of names or a schema).
        dependency: Value,
    },
    /// The input value is not valid under all of the given schemas.
    DoesNotMatchAllOf {
        /// The sub-schemas of the `allOf` keyword.
        schemas: Value,
    },
    /// The input value is not valid under any of the given schemas.
    DoesNotMatchAnyOf {
        /// The sub-schemas of the `anyOf` keyword.
        schemas: Value,
    },
    /// The negated schema matched the input value.
    ShouldNotMatch {
        /// The sub-schema of the `not` keyword.
        schema: Value,
    },
    /// A `$ref` could not be resolved to a usable schema. Fatal: aborts
    /// validation regardless of where it occurs.
    UnresolvableRef {
        /// The reference that failed to resolve.
        reference: String,
    },
}

/// Shortcuts for creation of specific error kinds.
impl ValidationError {
    pub(crate) fn single_type_error(instance: &Value, expected: PrimitiveType) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::WrongType {
                expected: TypeKind::Single(expected),
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn multiple_type_error(
        instance: &Value,
        expected: Vec<PrimitiveType>,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::WrongType {
                expected: TypeKind::Multiple(expected),
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn invalid_enum_value(instance: &Value, options: &Value) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::InvalidEnumValue {
                options: options.clone(),
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn out_of_bounds(
        instance: &Value,
        limit: f64,
        exclusive: bool,
        bound: Limit,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::OutOfBounds {
                limit,
                exclusive,
                bound,
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn not_multiple_of(instance: &Value, multiple_of: f64) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::NotMultipleOf { multiple_of },
            data: instance.clone(),
        }
    }
    pub(crate) fn string_too_short(instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::StringTooShort { limit },
            data: instance.clone(),
        }
    }
    pub(crate) fn string_too_long(instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::StringTooLong { limit },
            data: instance.clone(),
        }
    }
    pub(crate) fn pattern(instance: &Value, pattern: String) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::StringDoesNotMatchPattern { pattern },
            data: instance.clone(),
        }
    }
    pub(crate) fn format(instance: &Value, format: &str) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::WrongFormat {
                format: format.to_string(),
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn missing_property() -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::MissingProperty,
            data: Value::Null,
        }
    }
    pub(crate) fn properties(
        instance: &Value,
        properties: Vec<(String, ValidationError)>,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::Properties { properties },
            data: instance.clone(),
        }
    }
    pub(crate) fn invalid_pattern_properties(
        pattern: String,
        properties: Vec<String>,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::InvalidPatternProperties {
                pattern,
                properties,
            },
            data: Value::Null,
        }
    }
    pub(crate) fn additional_properties(
        instance: &Value,
        property_names: Vec<String>,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::AdditionalProperties { property_names },
            data: instance.clone(),
        }
    }
    pub(crate) fn invalid_additional_properties(
        instance: &Value,
        properties: Vec<(String, ValidationError)>,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::InvalidAdditionalProperties { properties },
            data: instance.clone(),
        }
    }
    pub(crate) fn too_few_properties(instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::TooFewProperties { limit },
            data: instance.clone(),
        }
    }
    pub(crate) fn too_many_properties(instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::TooManyProperties { limit },
            data: instance.clone(),
        }
    }
    pub(crate) fn array_items(
        instance: &Value,
        items: Vec<(usize, ValidationError)>,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::ArrayItems { items },
            data: instance.clone(),
        }
    }
    pub(crate) fn wrong_number_of_elements(
        instance: &Value,
        limit: u64,
        actual: usize,
        bound: Limit,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::WrongNumberOfElements {
                limit,
                actual,
                bound,
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn duplicate_items(instance: &Value, duplicates: Vec<Value>) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::DuplicateItems { duplicates },
            data: instance.clone(),
        }
    }
    pub(crate) fn dependency_mismatch(
        instance: &Value,
        property: String,
        dependency: Value,
    ) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::DependencyMismatch {
                property,
                dependency,
            },
            data: instance.clone(),
        }
    }
    pub(crate) fn does_not_match_all_of(instance: &Value, schemas: Value) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::DoesNotMatchAllOf { schemas },
            data: instance.clone(),
        }
    }
    pub(crate) fn does_not_match_any_of(instance: &Value, schemas: Value) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::DoesNotMatchAnyOf { schemas },
            data: instance.clone(),
        }
    }
    pub(crate) fn should_not_match(instance: &Value, schema: Value) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::ShouldNotMatch { schema },
            data: instance.clone(),
        }
    }
    pub(crate) fn unresolvable_ref(reference: String) -> ValidationError {
        ValidationError {
            kind: ValidationErrorKind::UnresolvableRef { reference },
            data: Value::Null,
        }
    }
}

impl ValidationError {
    /// The error kind with its payload.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// The part of the instance the error refers to.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Whether this error aborted validation because a reference could not
    /// be resolved. Such errors propagate through combinators unchanged.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::UnresolvableRef { .. })
    }

    fn tag(&self) -> &'static str {
        match self.kind {
            ValidationErrorKind::WrongType { .. } => "wrong-type",
            ValidationErrorKind::InvalidEnumValue { .. } => "invalid-enum-value",
            ValidationErrorKind::OutOfBounds { .. } => "out-of-bounds",
            ValidationErrorKind::NotMultipleOf { .. } => "not-multiple-of",
            ValidationErrorKind::StringTooShort { .. } => "string-too-short",
            ValidationErrorKind::StringTooLong { .. } => "string-too-long",
            ValidationErrorKind::StringDoesNotMatchPattern { .. } => {
                "string-does-not-match-pattern"
            }
            ValidationErrorKind::WrongFormat { .. } => "wrong-format",
            ValidationErrorKind::MissingProperty => "missing-property",
            ValidationErrorKind::Properties { .. } => "properties",
            ValidationErrorKind::InvalidPatternProperties { .. } => "invalid-pattern-properties",
            ValidationErrorKind::AdditionalProperties { .. } => "additional-properties",
            ValidationErrorKind::InvalidAdditionalProperties { .. } => {
                "invalid-additional-properties"
            }
            ValidationErrorKind::TooFewProperties { .. } => "too-few-properties",
            ValidationErrorKind::TooManyProperties { .. } => "too-many-properties",
            ValidationErrorKind::ArrayItems { .. } => "array-items",
            ValidationErrorKind::WrongNumberOfElements { .. } => "wrong-number-of-elements",
            ValidationErrorKind::DuplicateItems { .. } => "duplicate-items-not-allowed",
            ValidationErrorKind::DependencyMismatch { .. } => "dependency-mismatch",
            ValidationErrorKind::DoesNotMatchAllOf { .. } => "does-not-match-all-of",
            ValidationErrorKind::DoesNotMatchAnyOf { .. } => "does-not-match-any-of",
            ValidationErrorKind::ShouldNotMatch { .. } => "should-not-match",
            ValidationErrorKind::UnresolvableRef { .. } => "unresolvable-ref",
        }
    }

    /// Render the error as a JSON mapping with an `error` discriminant and
    /// kind-specific payload fields. Nested errors (`properties`,
    /// `array-items`, ...) are rendered recursively.
    pub fn to_value(&self) -> Value {
        let mut record = Map::new();
        record.insert("error".to_string(), json!(self.tag()));
        match &self.kind {
            ValidationErrorKind::WrongType { expected } => {
                let expected = match expected {
                    TypeKind::Single(type_) => json!(type_.to_string()),
                    TypeKind::Multiple(types) => {
                        json!(types.iter().map(ToString::to_string).collect::<Vec<_>>())
                    }
                };
                record.insert("expected".to_string(), expected);
            }
            ValidationErrorKind::InvalidEnumValue { options } => {
                record.insert("enum".to_string(), options.clone());
            }
            ValidationErrorKind::OutOfBounds {
                limit,
                exclusive,
                bound,
            } => {
                record.insert(bound_key(*bound).to_string(), json!(limit));
                record.insert("exclusive".to_string(), json!(exclusive));
            }
            ValidationErrorKind::NotMultipleOf { multiple_of } => {
                record.insert("expected-multiple-of".to_string(), json!(multiple_of));
            }
            ValidationErrorKind::StringTooShort { limit } => {
                record.insert("minimum".to_string(), json!(limit));
            }
            ValidationErrorKind::StringTooLong { limit } => {
                record.insert("maximum".to_string(), json!(limit));
            }
            ValidationErrorKind::StringDoesNotMatchPattern { pattern } => {
                record.insert("pattern".to_string(), json!(pattern));
            }
            ValidationErrorKind::WrongFormat { format } => {
                record.insert("format".to_string(), json!(format));
            }
            ValidationErrorKind::MissingProperty => {}
            ValidationErrorKind::Properties { properties } => {
                let mut map = Map::new();
                for (name, error) in properties {
                    map.insert(name.clone(), error.to_value());
                }
                record.insert("properties".to_string(), Value::Object(map));
            }
            ValidationErrorKind::InvalidPatternProperties {
                pattern,
                properties,
            } => {
                record.insert("pattern".to_string(), json!(pattern));
                record.insert("properties".to_string(), json!(properties));
            }
            ValidationErrorKind::AdditionalProperties { property_names } => {
                record.insert("property-names".to_string(), json!(property_names));
            }
            ValidationErrorKind::InvalidAdditionalProperties { properties } => {
                let mut map = Map::new();
                for (name, error) in properties {
                    map.insert(name.clone(), error.to_value());
                }
                record.insert(
                    "invalid-additional-properties".to_string(),
                    Value::Object(map),
                );
            }
            ValidationErrorKind::TooFewProperties { limit } => {
                record.insert("minimum".to_string(), json!(limit));
            }
            ValidationErrorKind::TooManyProperties { limit } => {
                record.insert("maximum".to_string(), json!(limit));
            }
            ValidationErrorKind::ArrayItems { items } => {
                let mut rendered = Vec::with_capacity(items.len());
                for (position, error) in items {
                    let mut item = error.to_value();
                    if let Some(map) = item.as_object_mut() {
                        map.insert("position".to_string(), json!(position));
                    }
                    rendered.push(item);
                }
                record.insert("items".to_string(), Value::Array(rendered));
            }
            ValidationErrorKind::WrongNumberOfElements {
                limit,
                actual,
                bound,
            } => {
                record.insert(bound_key(*bound).to_string(), json!(limit));
                record.insert("actual".to_string(), json!(actual));
            }
            ValidationErrorKind::DuplicateItems { duplicates } => {
                record.insert("duplicates".to_string(), json!(duplicates));
            }
            ValidationErrorKind::DependencyMismatch {
                property,
                dependency,
            } => {
                let mut spec = Map::new();
                spec.insert(property.clone(), dependency.clone());
                record.insert("dependency".to_string(), Value::Object(spec));
            }
            ValidationErrorKind::DoesNotMatchAllOf { schemas }
            | ValidationErrorKind::DoesNotMatchAnyOf { schemas } => {
                record.insert("schemas".to_string(), schemas.clone());
            }
            ValidationErrorKind::ShouldNotMatch { schema } => {
                record.insert("schema".to_string(), schema.clone());
            }
            ValidationErrorKind::UnresolvableRef { reference } => {
                record.insert("reference".to_string(), json!(reference));
            }
        }
        if !self.data.is_null() {
            record.insert("data".to_string(), self.data.clone());
        }
        Value::Object(record)
    }
}

impl error::Error for ValidationError {}

fn bound_key(bound: Limit) -> &'static str {
    match bound {
        Limit::Minimum => "minimum",
        Limit::Maximum => "maximum",
    }
}

fn join_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<String>>()
        .join(", ")
}

/// Textual representation of various validation errors.
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::WrongType { expected } => match expected {
                TypeKind::Single(type_) => {
                    write!(f, "'{}' is not of type '{}'", self.data, type_)
                }
                TypeKind::Multiple(types) => write!(
                    f,
                    "'{}' is not of types '{}'",
                    self.data,
                    types
                        .iter()
                        .map(|t| format!("{}", t))
                        .collect::<Vec<String>>()
                        .join(", ")
                ),
            },
            ValidationErrorKind::InvalidEnumValue { options } => {
                write!(f, "'{}' is not one of '{}'", self.data, options)
            }
            ValidationErrorKind::OutOfBounds {
                limit,
                exclusive,
                bound,
            } => {
                let (relation, side) = match bound {
                    Limit::Minimum => ("less than", "minimum"),
                    Limit::Maximum => ("greater than", "maximum"),
                };
                if *exclusive {
                    write!(
                        f,
                        "{} is {} or equal to the {} of {}",
                        self.data, relation, side, limit
                    )
                } else {
                    write!(f, "{} is {} the {} of {}", self.data, relation, side, limit)
                }
            }
            ValidationErrorKind::NotMultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {}", self.data, multiple_of)
            }
            ValidationErrorKind::StringTooShort { limit } => {
                write!(f, "'{}' is shorter than {} characters", self.data, limit)
            }
            ValidationErrorKind::StringTooLong { limit } => {
                write!(f, "'{}' is longer than {} characters", self.data, limit)
            }
            ValidationErrorKind::StringDoesNotMatchPattern { pattern } => {
                write!(f, "'{}' does not match '{}'", self.data, pattern)
            }
            ValidationErrorKind::WrongFormat { format } => {
                write!(f, "'{}' is not a '{}'", self.data, format)
            }
            ValidationErrorKind::MissingProperty => write!(f, "required property is missing"),
            ValidationErrorKind::Properties { properties } => {
                let names: Vec<String> = properties.iter().map(|(name, _)| name.clone()).collect();
                write!(
                    f,
                    "{} has invalid properties ({})",
                    self.data,
                    join_names(&names)
                )
            }
            ValidationErrorKind::InvalidPatternProperties {
                pattern,
                properties,
            } => write!(
                f,
                "properties {} do not match '{}'",
                join_names(properties),
                pattern
            ),
            ValidationErrorKind::AdditionalProperties { property_names } => {
                let verb = if property_names.len() == 1 {
                    "was"
                } else {
                    "were"
                };
                write!(
                    f,
                    "Additional properties are not allowed ({} {} unexpected)",
                    join_names(property_names),
                    verb
                )
            }
            ValidationErrorKind::InvalidAdditionalProperties { properties } => {
                let names: Vec<String> = properties.iter().map(|(name, _)| name.clone()).collect();
                write!(
                    f,
                    "{} has invalid additional properties ({})",
                    self.data,
                    join_names(&names)
                )
            }
            ValidationErrorKind::TooFewProperties { limit } => {
                write!(f, "{} has less than {} properties", self.data, limit)
            }
            ValidationErrorKind::TooManyProperties { limit } => {
                write!(f, "{} has more than {} properties", self.data, limit)
            }
            ValidationErrorKind::ArrayItems { items } => {
                let positions: Vec<String> =
                    items.iter().map(|(i, _)| format!("{}", i)).collect();
                write!(
                    f,
                    "{} has invalid items at positions [{}]",
                    self.data,
                    positions.join(", ")
                )
            }
            ValidationErrorKind::WrongNumberOfElements { limit, bound, .. } => match bound {
                Limit::Minimum => write!(f, "{} has less than {} items", self.data, limit),
                Limit::Maximum => write!(f, "{} has more than {} items", self.data, limit),
            },
            ValidationErrorKind::DuplicateItems { .. } => {
                write!(f, "'{}' has non-unique elements", self.data)
            }
            ValidationErrorKind::DependencyMismatch { property, .. } => write!(
                f,
                "{} does not satisfy the dependency of '{}'",
                self.data, property
            ),
            ValidationErrorKind::DoesNotMatchAllOf { .. } => write!(
                f,
                "'{}' is not valid under all of the given schemas",
                self.data
            ),
            ValidationErrorKind::DoesNotMatchAnyOf { .. } => write!(
                f,
                "'{}' is not valid under any of the given schemas",
                self.data
            ),
            ValidationErrorKind::ShouldNotMatch { schema } => {
                write!(f, "{} is not allowed for {}", schema, self.data)
            }
            ValidationErrorKind::UnresolvableRef { reference } => {
                write!(f, "Unresolvable reference: {}", reference)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive_type::PrimitiveType;
    use serde_json::json;

    #[test]
    fn type_error() {
        let instance = json!(42);
        let err = ValidationError::single_type_error(&instance, PrimitiveType::String);
        let repr = format!("{}", err);
        assert_eq!(repr, "'42' is not of type 'string'")
    }

    #[test]
    fn structured_record() {
        let instance = json!(0);
        let err = ValidationError::out_of_bounds(&instance, 1., false, Limit::Minimum);
        assert_eq!(
            err.to_value(),
            json!({"error": "out-of-bounds", "minimum": 1.0, "exclusive": false, "data": 0})
        );
    }

    #[test]
    fn nested_record() {
        let instance = json!({});
        let err = ValidationError::properties(
            &instance,
            vec![("a".to_string(), ValidationError::missing_property())],
        );
        assert_eq!(
            err.to_value(),
            json!({"error": "properties", "properties": {"a": {"error": "missing-property"}}, "data": {}})
        );
    }
}
