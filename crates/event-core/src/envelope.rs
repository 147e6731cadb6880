//! 入站消息信封

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// 无法解码的消息
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has no string `type` field")]
    MissingType,
}

/// 入站消息 `{ type, data }`
///
/// `type` 选择创建操作，`data` 在解析到具体输入类型之前保持原样。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default = "empty_data")]
    pub data: Value,
}

fn empty_data() -> Value {
    Value::Object(Map::new())
}

impl Envelope {
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// 从 Kafka 消息体解码
    pub fn from_slice(payload: &[u8]) -> Result<Self, EnvelopeError> {
        let value: Value = serde_json::from_slice(payload)?;
        Self::from_value(value)
    }

    /// 接受 `{ type, data }` 或外层包装的 `{ message: { type, data } }`
    pub fn from_value(value: Value) -> Result<Self, EnvelopeError> {
        let Value::Object(mut fields) = value else {
            return Err(EnvelopeError::NotAnObject);
        };

        if !fields.contains_key("type") {
            if let Some(Value::Object(inner)) = fields.remove("message") {
                fields = inner;
            }
        }

        let event_type = match fields.remove("type") {
            Some(Value::String(event_type)) => event_type,
            _ => return Err(EnvelopeError::MissingType),
        };
        let data = fields.remove("data").unwrap_or_else(empty_data);

        Ok(Self { event_type, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_envelope() {
        let envelope =
            Envelope::from_slice(br#"{"type":"locations","data":{"city":"Lisbon"}}"#).unwrap();

        assert_eq!(envelope.event_type, "locations");
        assert_eq!(envelope.data, json!({ "city": "Lisbon" }));
    }

    #[test]
    fn test_wrapped_envelope() {
        let envelope = Envelope::from_value(json!({
            "message": { "type": "users", "data": { "accountId": 1 } }
        }))
        .unwrap();

        assert_eq!(envelope.event_type, "users");
        assert_eq!(envelope.data["accountId"], 1);
    }

    #[test]
    fn test_missing_data_is_empty_map() {
        let envelope = Envelope::from_value(json!({ "type": "onboarding" })).unwrap();
        assert_eq!(envelope.data, json!({}));
    }

    #[test]
    fn test_undecodable_payloads() {
        assert!(matches!(
            Envelope::from_slice(b"not json"),
            Err(EnvelopeError::InvalidJson(_))
        ));
        assert!(matches!(
            Envelope::from_value(json!([1, 2])),
            Err(EnvelopeError::NotAnObject)
        ));
        assert!(matches!(
            Envelope::from_value(json!({ "type": 42, "data": {} })),
            Err(EnvelopeError::MissingType)
        ));
        assert!(matches!(
            Envelope::from_value(json!({ "message": "hello" })),
            Err(EnvelopeError::MissingType)
        ));
    }
}
