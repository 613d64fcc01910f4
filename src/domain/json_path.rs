//! Safe lookups over loosely-typed page JSON
//!
//! Storefront blobs are duck-typed: any nested key may be missing, `null`,
//! or of an unexpected kind. These helpers make every access explicit.

use serde_json::Value;

/// Walk `path` through nested objects, returning `None` at the first gap.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// JavaScript truthiness of a JSON value.
///
/// `null`, `false`, `0`, `NaN` and `""` are falsy; arrays and objects are
/// always truthy, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Truthiness of an optional field, treating absence as falsy.
pub fn is_present_and_truthy(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Render an identifier-like JSON value (string or number) as text.
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_paths() {
        let blob = json!({ "buyfulldisco": { "tralbums": [1, 2] } });
        assert_eq!(lookup(&blob, &["buyfulldisco", "tralbums"]), Some(&json!([1, 2])));
        assert_eq!(lookup(&blob, &["buyfulldisco", "missing"]), None);
        assert_eq!(lookup(&blob, &["buyfulldisco", "tralbums", "deeper"]), None);
        assert_eq!(lookup(&blob, &[]), Some(&blob));
    }

    #[test]
    fn test_truthiness_matches_javascript() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
        assert!(!is_present_and_truthy(None));
    }

    #[test]
    fn test_id_text() {
        assert_eq!(id_text(&json!("123")), Some("123".to_string()));
        assert_eq!(id_text(&json!(123)), Some("123".to_string()));
        assert_eq!(id_text(&json!("")), None);
        assert_eq!(id_text(&json!(null)), None);
        assert_eq!(id_text(&json!({ "id": 1 })), None);
    }
}
