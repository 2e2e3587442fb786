use serde_json::Value;

/// Structural equality between JSON values. Numbers are compared by value,
/// so `1` and `1.0` are equal.
pub(crate) fn equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(left, right)| equal(left, right))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right
                        .get(key)
                        .map_or(false, |other_value| equal(value, other_value))
                })
        }
        (_, _) => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::equal;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(1), json!(1.0), true)]
    #[test_case(json!(1), json!(1.5), false)]
    #[test_case(json!([1, 2]), json!([1.0, 2.0]), true)]
    #[test_case(json!({"a": 1}), json!({"a": 1.0}), true)]
    #[test_case(json!({"a": 1}), json!({"a": 1, "b": 2}), false)]
    #[test_case(json!("a"), json!("a"), true)]
    #[test_case(json!(null), json!(0), false)]
    fn structural_equality(left: serde_json::Value, right: serde_json::Value, expected: bool) {
        assert_eq!(equal(&left, &right), expected)
    }
}
