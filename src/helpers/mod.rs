use serde_json::{Map, Value};

use crate::error::{Result, ViewError};

pub type Object = Map<String, Value>;

/// Joins a payload location and a field name, e.g. `days.2024-01-01` + `endTime90k`.
pub fn field_path(context: &str, field: &str) -> String {
    if context.is_empty() {
        field.to_string()
    } else {
        format!("{context}.{field}")
    }
}

pub fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Object> {
    value.as_object().ok_or_else(|| {
        let what = if context.is_empty() { "payload" } else { context };
        ViewError::validation(format!("{what} must be a JSON object, got {}", kind(value)))
    })
}

pub fn require<'a>(obj: &'a Object, field: &str, context: &str) -> Result<&'a Value> {
    match obj.get(field) {
        Some(Value::Null) | None => Err(ViewError::validation(format!(
            "{} is missing",
            field_path(context, field)
        ))),
        Some(value) => Ok(value),
    }
}

pub fn require_str(obj: &Object, field: &str, context: &str) -> Result<String> {
    let value = require(obj, field, context)?;
    value.as_str().map(str::to_string).ok_or_else(|| {
        ViewError::validation(format!(
            "{} must be a string, got {}",
            field_path(context, field),
            kind(value)
        ))
    })
}

pub fn require_i64(obj: &Object, field: &str, context: &str) -> Result<i64> {
    to_i64(require(obj, field, context)?, &field_path(context, field))
}

/// Reads an integer that must not be negative.
pub fn require_non_negative(obj: &Object, field: &str, context: &str) -> Result<i64> {
    let value = require_i64(obj, field, context)?;
    if value < 0 {
        return Err(ViewError::validation(format!(
            "{} contains negative value {value}",
            field_path(context, field)
        )));
    }
    Ok(value)
}

pub fn optional_i64(obj: &Object, field: &str, context: &str) -> Result<Option<i64>> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(None),
        Some(value) => to_i64(value, &field_path(context, field)).map(Some),
    }
}

pub fn optional_bool(obj: &Object, field: &str, context: &str) -> Result<bool> {
    match obj.get(field) {
        Some(Value::Null) | None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ViewError::validation(format!(
            "{} must be a boolean, got {}",
            field_path(context, field),
            kind(other)
        ))),
    }
}

fn to_i64(value: &Value, path: &str) -> Result<i64> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            ViewError::validation(format!("{path} must be an integer in i64 range, got {n}"))
        }),
        other => Err(ViewError::validation(format!(
            "{path} must be an integer, got {}",
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_field_path() {
        assert_eq!(field_path("", "id"), "id");
        assert_eq!(field_path("days.2024-01-01", "endTime90k"), "days.2024-01-01.endTime90k");
    }

    #[test]
    fn test_missing_and_null_are_both_missing() {
        let o = obj(json!({ "a": null }));
        let err = require(&o, "a", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: a is missing");
        let err = require(&o, "b", "cameras[0]").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: cameras[0].b is missing");
    }

    #[test]
    fn test_integers_are_strict() {
        let o = obj(json!({ "f": 1.5, "s": "12", "n": -3, "big": u64::MAX, "ok": 7 }));
        assert!(require_i64(&o, "f", "").is_err());
        assert!(require_i64(&o, "s", "").is_err());
        assert!(require_i64(&o, "big", "").is_err());
        assert_eq!(require_i64(&o, "n", "").unwrap(), -3);
        assert!(require_non_negative(&o, "n", "").is_err());
        assert_eq!(require_non_negative(&o, "ok", "").unwrap(), 7);
    }

    #[test]
    fn test_optional_fields() {
        let o = obj(json!({ "endId": null, "growing": true, "openId": 4 }));
        assert_eq!(optional_i64(&o, "endId", "").unwrap(), None);
        assert_eq!(optional_i64(&o, "openId", "").unwrap(), Some(4));
        assert!(optional_bool(&o, "growing", "").unwrap());
        assert!(!optional_bool(&o, "firstUncommitted", "").unwrap());
    }

    #[test]
    fn test_strings() {
        let o = obj(json!({ "id": "abc", "n": 1 }));
        assert_eq!(require_str(&o, "id", "").unwrap(), "abc");
        let err = require_str(&o, "n", "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: n must be a string, got number");
    }
}
