//! adapter-kafka - Kafka 适配器
//!
//! - 消息生产：`EventPublisher` 实现，用于结果事件和 HTTP 转发
//! - 消息消费：单 topic 流式消费，手动提交，无法解码的消息转入 DLQ
//! - 连通性探测：拉取 broker 元数据

mod config;
mod consumer;
mod health;
mod producer;

pub use config::*;
pub use consumer::*;
pub use health::*;
pub use producer::*;
