// Analysis pipeline: resume structuring, JD structuring, skill matching,
// course recommendations. All LLM calls go through llm_client.

pub mod courses;
pub mod handlers;
pub mod jd;
pub mod matcher;
pub mod prompts;
pub mod resume;

use serde_json::Value;

/// Coerces the named fields of an LLM JSON object into arrays.
///
/// Models occasionally return a bare string (or null) where the schema asks
/// for a list; downstream deserialization expects arrays, so scalars are
/// wrapped and nulls become empty lists.
pub fn coerce_list_fields(value: &mut Value, fields: &[&str]) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    for field in fields {
        match obj.get(*field) {
            Some(Value::Array(_)) => {}
            Some(Value::Null) | None => {
                obj.insert(field.to_string(), Value::Array(vec![]));
            }
            Some(other) => {
                let single = other.clone();
                obj.insert(field.to_string(), Value::Array(vec![single]));
            }
        }
    }
}

/// Coerces the named fields of an LLM JSON object into strings.
///
/// The prompts allow null for unknown scalar fields and models sometimes
/// return numbers for things like years of experience. Both become strings
/// (null and missing become empty).
pub fn coerce_string_fields(value: &mut Value, fields: &[&str]) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };
    for field in fields {
        match obj.get(*field) {
            Some(Value::String(_)) => {}
            Some(Value::Null) | None => {
                obj.insert(field.to_string(), Value::String(String::new()));
            }
            Some(other) => {
                let text = match other {
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => other.to_string(),
                };
                obj.insert(field.to_string(), Value::String(text));
            }
        }
    }
}

/// Unwraps a singleton array into its first element.
/// Some models wrap the requested object in a one-element array.
pub fn unwrap_singleton(value: Value) -> Value {
    match value {
        Value::Array(mut items) if !items.is_empty() => items.remove(0),
        other => other,
    }
}
