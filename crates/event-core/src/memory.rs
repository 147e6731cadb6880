//! 内存事件总线

use async_trait::async_trait;
use pulse_errors::{AppError, AppResult};
use pulse_ports::EventPublisher;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// 已发布的消息
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Value,
}

/// 内存事件总线实现，记录所有发布的消息
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    messages: Arc<RwLock<Vec<PublishedMessage>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取所有发布的消息（用于测试）
    pub async fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.read().await.clone()
    }

    /// 获取某个 topic 上的消息（用于测试）
    pub async fn messages_on(&self, topic: &str) -> Vec<Value> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.topic == topic)
            .map(|m| m.payload.clone())
            .collect()
    }

    /// 模拟 broker 不可用
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::external_service("In-memory bus is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish<E: Serialize + Send + Sync>(&self, topic: &str, event: &E) -> AppResult<()> {
        self.check_available()?;
        let payload = serde_json::to_value(event)
            .map_err(|e| AppError::internal(format!("Failed to serialize event: {}", e)))?;

        tracing::debug!(topic = %topic, "Event published");
        self.messages.write().await.push(PublishedMessage {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }

    async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()> {
        self.check_available()?;
        let payload = serde_json::from_str(payload)
            .unwrap_or_else(|_| Value::String(payload.to_string()));

        self.messages.write().await.push(PublishedMessage {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }
}
