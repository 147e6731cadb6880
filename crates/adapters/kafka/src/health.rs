//! broker 连通性探测

use std::sync::Arc;
use std::time::{Duration, Instant};

use pulse_errors::{AppError, AppResult};
use rdkafka::consumer::{BaseConsumer, Consumer};
use tracing::debug;

use crate::config::{KafkaConnection, create_client};

/// 一次成功检查看到的集群状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerStatus {
    pub brokers: usize,
    pub latency: Duration,
}

impl BrokerStatus {
    fn into_result(self) -> AppResult<Self> {
        if self.brokers == 0 {
            return Err(AppError::unavailable("No Kafka brokers in cluster metadata"));
        }
        Ok(self)
    }
}

/// 通过拉取集群元数据判断 broker 是否可达
///
/// 持有一个不订阅任何 topic 的 `BaseConsumer`，检查本身是阻塞调用。
pub struct KafkaBrokerCheck {
    client: BaseConsumer,
    timeout: Duration,
}

impl KafkaBrokerCheck {
    pub fn new(connection: &KafkaConnection) -> AppResult<Self> {
        let client: BaseConsumer = create_client(connection.to_client_config_entries(), "health check")?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(5),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 阻塞直到拿到元数据或超时
    pub fn check(&self) -> AppResult<BrokerStatus> {
        let started = Instant::now();
        let metadata = self
            .client
            .fetch_metadata(None, self.timeout)
            .map_err(|e| AppError::unavailable(format!("Kafka metadata request failed: {}", e)))?;

        let status = BrokerStatus {
            brokers: metadata.brokers().len(),
            latency: started.elapsed(),
        };
        debug!(brokers = status.brokers, latency_ms = status.latency.as_millis() as u64, "Kafka metadata fetched");
        status.into_result()
    }

    /// 在阻塞线程池中检查
    pub async fn check_blocking(self: Arc<Self>) -> AppResult<BrokerStatus> {
        tokio::task::spawn_blocking(move || self.check())
            .await
            .map_err(|e| AppError::internal(format!("Kafka health check task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cluster_is_unavailable() {
        let status = BrokerStatus {
            brokers: 0,
            latency: Duration::from_millis(3),
        };

        let err = status.into_result().unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[test]
    fn test_reachable_cluster() {
        let status = BrokerStatus {
            brokers: 3,
            latency: Duration::from_millis(3),
        };

        assert_eq!(status.into_result().unwrap().brokers, 3);
    }

    #[test]
    #[ignore] // 需要 Kafka 实例
    fn test_check_local_broker() {
        let checker =
            KafkaBrokerCheck::new(&KafkaConnection::new("localhost:9092", "health")).unwrap();
        assert!(checker.check().unwrap().brokers > 0);
    }
}
