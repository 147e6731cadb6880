//! Event Publisher trait 定义

use async_trait::async_trait;
use pulse_errors::AppResult;
use serde::Serialize;

/// 事件发布者 trait
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// 序列化并发布事件
    async fn publish<E: Serialize + Send + Sync>(&self, topic: &str, event: &E) -> AppResult<()>;

    /// 发布原始 JSON 字符串
    async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()>;
}
