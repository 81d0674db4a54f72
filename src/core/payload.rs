use crate::domain::model::RawRecord;
use crate::utils::error::{DirectoryError, Result};
use serde_json::Value;

/// Shape of the upstream payload. The endpoint is expected to return a
/// bare JSON array, but some deployments wrap the array in an object
/// under an arbitrary key; anything else is unrecognized.
#[derive(Debug)]
pub enum PayloadShape {
    RecordArray(Vec<Value>),
    WrappedRecordArray { key: String, records: Vec<Value> },
    Unrecognized(Value),
}

/// Classify a decoded payload. For objects, the first array-valued
/// property (one level deep, document order) wins.
pub fn detect_shape(payload: Value) -> PayloadShape {
    match payload {
        Value::Array(items) => PayloadShape::RecordArray(items),
        Value::Object(map) => {
            for (key, value) in &map {
                if value.is_array() {
                    let records = value.as_array().cloned().unwrap_or_default();
                    return PayloadShape::WrappedRecordArray {
                        key: key.clone(),
                        records,
                    };
                }
            }
            PayloadShape::Unrecognized(Value::Object(map))
        }
        other => PayloadShape::Unrecognized(other),
    }
}

/// Flatten a recognized shape into raw records. Non-object array items
/// are dropped; an unrecognized shape is a fetch failure.
pub fn into_records(shape: PayloadShape) -> Result<Vec<RawRecord>> {
    let (items, wrapper) = match shape {
        PayloadShape::RecordArray(items) => (items, None),
        PayloadShape::WrappedRecordArray { key, records } => (records, Some(key)),
        PayloadShape::Unrecognized(value) => {
            return Err(DirectoryError::UnrecognizedPayloadError {
                detail: format!(
                    "expected a JSON array or an object wrapping one, got {}",
                    type_name(&value)
                ),
            });
        }
    };

    if let Some(key) = wrapper {
        tracing::debug!("Payload array found under wrapper key '{}'", key);
    }

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0usize;
    for item in items {
        match item {
            Value::Object(data) => records.push(RawRecord { data }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::warn!("Skipped {} non-object payload items", skipped);
    }
    Ok(records)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without any array property",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_bare_array() {
        let shape = detect_shape(json!([{"name": "Dr. A"}]));
        assert!(matches!(shape, PayloadShape::RecordArray(ref items) if items.len() == 1));
    }

    #[test]
    fn test_detect_wrapped_array_first_array_property_wins() {
        let shape = detect_shape(json!({
            "meta": {"count": 2},
            "doctors": [{"name": "Dr. A"}, {"name": "Dr. B"}],
            "extra": ["ignored"]
        }));
        match shape {
            PayloadShape::WrappedRecordArray { key, records } => {
                assert_eq!(key, "doctors");
                assert_eq!(records.len(), 2);
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn test_detect_unrecognized() {
        assert!(matches!(
            detect_shape(json!({"count": 3})),
            PayloadShape::Unrecognized(_)
        ));
        assert!(matches!(detect_shape(json!("hello")), PayloadShape::Unrecognized(_)));
        assert!(matches!(detect_shape(json!(null)), PayloadShape::Unrecognized(_)));
    }

    #[test]
    fn test_into_records_drops_non_objects() {
        let shape = detect_shape(json!([{"name": "Dr. A"}, 42, "junk", {"name": "Dr. B"}]));
        let records = into_records(shape).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].str_field("name"), Some("Dr. A"));
    }

    #[test]
    fn test_into_records_unrecognized_is_error() {
        let err = into_records(detect_shape(json!(7))).unwrap_err();
        assert!(err.is_fetch_failure());
    }
}
