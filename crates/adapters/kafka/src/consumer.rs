//! Kafka Consumer
//!
//! 单 topic 流式消费。每条消息交给处理函数一次，不做重试：
//! 处理函数返回错误时消息转入 DLQ，之后无论结果都提交偏移量。

use std::future::Future;
use std::time::Duration;

use futures_util::StreamExt;
use pulse_errors::{AppError, AppResult};
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{ConsumerSettings, KafkaConnection, create_client};

/// 消费的消息
#[derive(Debug, Clone)]
pub struct ConsumedMessage {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
    pub key: Option<String>,
    /// 原始消息体
    pub payload: Vec<u8>,
    pub timestamp: Option<i64>,
}

/// DLQ 消息元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlqMetadata {
    pub original_topic: String,
    pub original_partition: i32,
    pub original_offset: i64,
    /// 失败原因
    pub error_message: String,
    /// 失败时间戳（秒）
    pub failed_at: i64,
}

/// DLQ 消息包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DlqMessage {
    pub metadata: DlqMetadata,
    /// 原始消息内容，非 UTF-8 字节按有损方式转换
    pub payload: String,
}

impl DlqMessage {
    pub fn new(message: &ConsumedMessage, error_message: impl Into<String>) -> Self {
        Self {
            metadata: DlqMetadata {
                original_topic: message.topic.clone(),
                original_partition: message.partition,
                original_offset: message.offset,
                error_message: error_message.into(),
                failed_at: chrono::Utc::now().timestamp(),
            },
            payload: String::from_utf8_lossy(&message.payload).into_owned(),
        }
    }
}

/// Kafka Event Consumer
pub struct KafkaEventConsumer {
    consumer: StreamConsumer,
    dlq_producer: Option<FutureProducer>,
    settings: ConsumerSettings,
}

impl KafkaEventConsumer {
    /// 创建消费者并订阅配置的 topic
    pub fn new(settings: ConsumerSettings) -> AppResult<Self> {
        let consumer: StreamConsumer =
            create_client(settings.to_client_config_entries(), "consumer")?;

        consumer.subscribe(&[settings.topic.as_str()]).map_err(|e| {
            AppError::external_service(format!("Failed to subscribe to {}: {}", settings.topic, e))
        })?;

        let dlq_producer = if settings.enable_dlq {
            let connection = KafkaConnection::new(
                settings.connection.brokers.clone(),
                format!("{}-dlq", settings.connection.client_id),
            );
            let producer: FutureProducer =
                create_client(connection.to_client_config_entries(), "DLQ producer")?;
            Some(producer)
        } else {
            None
        };

        info!(
            group_id = %settings.group_id,
            topic = %settings.topic,
            dlq = settings.enable_dlq,
            "Kafka consumer created"
        );

        Ok(Self {
            consumer,
            dlq_producer,
            settings,
        })
    }

    /// 持续消费直到 `shutdown` 完成或消息流结束
    pub async fn run<F, Fut, S>(&self, handler: F, shutdown: S) -> AppResult<()>
    where
        F: Fn(ConsumedMessage) -> Fut + Send + Sync,
        Fut: Future<Output = AppResult<()>> + Send,
        S: Future<Output = ()> + Send,
    {
        let mut stream = self.consumer.stream();
        tokio::pin!(shutdown);

        loop {
            let next = tokio::select! {
                _ = &mut shutdown => {
                    info!("Kafka consumer shutting down");
                    break;
                }
                next = stream.next() => next,
            };

            let Some(result) = next else {
                break;
            };

            match result {
                Ok(message) => {
                    self.handle_message(&handler, &message).await;
                    if let Err(e) = self.consumer.commit_message(&message, CommitMode::Async) {
                        error!("Failed to commit offset: {}", e);
                    }
                }
                Err(e) => {
                    error!("Kafka error: {}", e);
                }
            }
        }

        info!("Kafka consumer stopped");
        Ok(())
    }

    async fn handle_message<F, Fut>(&self, handler: &F, message: &BorrowedMessage<'_>)
    where
        F: Fn(ConsumedMessage) -> Fut + Send + Sync,
        Fut: Future<Output = AppResult<()>> + Send,
    {
        // 空消息体照常交给 handler，由它判定为无效并进入死信队列
        let payload = message.payload().unwrap_or_default();
        if payload.is_empty() {
            debug!(
                topic = message.topic(),
                partition = message.partition(),
                offset = message.offset(),
                "Empty message payload"
            );
        }

        let consumed = ConsumedMessage {
            topic: message.topic().to_string(),
            partition: message.partition(),
            offset: message.offset(),
            key: message
                .key_view::<str>()
                .and_then(|r| r.ok())
                .map(|s| s.to_string()),
            payload: payload.to_vec(),
            timestamp: message.timestamp().to_millis(),
        };

        if let Err(e) = handler(consumed.clone()).await {
            error!(
                topic = %consumed.topic,
                partition = consumed.partition,
                offset = consumed.offset,
                error = %e,
                "Failed to handle message"
            );

            if let Err(dlq_err) = self.send_to_dlq(&consumed, &e.to_string()).await {
                error!("Failed to send to DLQ: {}", dlq_err);
            }
        }
    }

    /// 发送消息到 DLQ
    async fn send_to_dlq(&self, message: &ConsumedMessage, error_message: &str) -> AppResult<()> {
        let Some(dlq_producer) = self.dlq_producer.as_ref() else {
            warn!(
                topic = %message.topic,
                offset = message.offset,
                "DLQ is disabled, message will be lost"
            );
            return Ok(());
        };

        let dlq_topic = self.settings.dlq_topic();
        let dlq_payload = serde_json::to_string(&DlqMessage::new(message, error_message))
            .map_err(|e| AppError::internal(format!("Failed to serialize DLQ message: {}", e)))?;

        let record: FutureRecord<'_, str, String> = FutureRecord::to(&dlq_topic)
            .payload(&dlq_payload)
            .key(message.topic.as_str());

        dlq_producer
            .send(record, Timeout::After(Duration::from_secs(5)))
            .await
            .map_err(|(e, _)| AppError::external_service(format!("Failed to send to DLQ: {}", e)))?;

        warn!(
            dlq_topic = %dlq_topic,
            original_topic = %message.topic,
            partition = message.partition,
            offset = message.offset,
            error = %error_message,
            "Message sent to DLQ"
        );

        Ok(())
    }

    pub fn group_id(&self) -> &str {
        &self.settings.group_id
    }

    pub fn topic(&self) -> &str {
        &self.settings.topic
    }
}
