//! 结果事件与转发消息的发布

use std::time::Duration;

use async_trait::async_trait;
use pulse_errors::{AppError, AppResult};
use pulse_ports::EventPublisher;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ProducerSettings, create_client};

/// 基于 `FutureProducer` 的 `EventPublisher`，消息体为 JSON 文本，不带 key
pub struct KafkaEventPublisher {
    producer: FutureProducer,
    timeout: Duration,
}

impl KafkaEventPublisher {
    pub fn new(settings: &ProducerSettings) -> AppResult<Self> {
        let producer: FutureProducer =
            create_client(settings.to_client_config_entries(), "producer")?;

        info!(
            brokers = %settings.connection.brokers,
            client_id = %settings.connection.client_id,
            "Kafka producer created"
        );

        Ok(Self {
            producer,
            timeout: settings.request_timeout,
        })
    }

    /// 关闭前调用，等待队列中的消息送达
    pub fn flush(&self, timeout: Duration) -> AppResult<()> {
        self.producer
            .flush(Timeout::After(timeout))
            .map_err(|e| AppError::external_service(format!("Failed to flush Kafka producer: {}", e)))
    }
}

#[async_trait]
impl EventPublisher for KafkaEventPublisher {
    async fn publish<E: Serialize + Send + Sync>(&self, topic: &str, event: &E) -> AppResult<()> {
        self.publish_raw(topic, &encode(event)?).await
    }

    async fn publish_raw(&self, topic: &str, payload: &str) -> AppResult<()> {
        let record: FutureRecord<'_, str, str> = FutureRecord::to(topic).payload(payload);

        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map_err(|(e, _)| {
                AppError::external_service(format!("Failed to publish to {}: {}", topic, e))
            })?;

        debug!(topic = topic, partition, offset, "Message published");
        Ok(())
    }
}

fn encode<E: Serialize>(event: &E) -> AppResult<String> {
    serde_json::to_string(event)
        .map_err(|e| AppError::internal(format!("Failed to serialize event: {}", e)))
}
