//! 结果事件

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 处理完一个信封后发布的结果
///
/// 序列化为 `{ "status": "success", "type", "data" }` 或
/// `{ "status": "error", "type", "message" }`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResultEvent {
    Success {
        #[serde(rename = "type")]
        event_type: String,
        data: Value,
    },
    Error {
        #[serde(rename = "type")]
        event_type: String,
        message: String,
    },
}

impl ResultEvent {
    pub fn success(event_type: impl Into<String>, data: Value) -> Self {
        Self::Success {
            event_type: event_type.into(),
            data,
        }
    }

    pub fn error(event_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            event_type: event_type.into(),
            message: message.into(),
        }
    }

    pub fn event_type(&self) -> &str {
        match self {
            Self::Success { event_type, .. } | Self::Error { event_type, .. } => event_type,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
