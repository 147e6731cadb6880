//! 基础设施资源管理

use std::sync::Arc;
use std::time::Duration;

use pulse_adapter_kafka::{
    ConsumerSettings, KafkaConnection, KafkaEventConsumer, KafkaEventPublisher,
    KafkaBrokerCheck, ProducerSettings,
};
use pulse_adapter_postgres::{PostgresConfig, create_pool};
use pulse_config::AppConfig;
use pulse_errors::AppResult;
use sqlx::PgPool;
use tracing::{error, info};

use crate::health::{HealthChecker, KafkaReadiness, PostgresReadiness};
use crate::retry::{Backoff, connect_with_backoff};

/// 基础设施资源容器
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
    kafka_producer: Arc<KafkaEventPublisher>,
    kafka_check: Arc<KafkaBrokerCheck>,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let backoff = Backoff::default();

        let pg_config = PostgresConfig::from(&config.database);
        let postgres_pool = connect_with_backoff(&backoff, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;

        let producer_settings = ProducerSettings::from(&config.kafka);
        let kafka_producer = connect_with_backoff(&backoff, "Kafka producer", || {
            let settings = producer_settings.clone();
            async move { KafkaEventPublisher::new(&settings) }
        })
        .await?;

        let kafka_check = KafkaBrokerCheck::new(&KafkaConnection::from(&config.kafka))?
            .with_timeout(Duration::from_secs(3));

        info!(
            brokers = %config.kafka.brokers,
            database = %config.database.name,
            "Infrastructure initialized"
        );

        Ok(Self {
            config,
            postgres_pool,
            kafka_producer: Arc::new(kafka_producer),
            kafka_check: Arc::new(kafka_check),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    pub fn kafka_producer(&self) -> Arc<KafkaEventPublisher> {
        self.kafka_producer.clone()
    }

    /// 创建订阅 `kafka.topic` 的消费者
    pub fn kafka_consumer(&self) -> AppResult<KafkaEventConsumer> {
        KafkaEventConsumer::new(ConsumerSettings::from(&self.config.kafka))
    }

    /// 就绪检查：PostgreSQL 与 Kafka
    pub fn health_checker(&self) -> HealthChecker {
        HealthChecker::new()
            .with_check(Arc::new(PostgresReadiness::new(self.postgres_pool.clone())))
            .with_check(Arc::new(KafkaReadiness::new(self.kafka_check.clone())))
    }

    /// 刷新待发送消息并关闭连接
    pub async fn shutdown(&self) {
        if let Err(e) = self.kafka_producer.flush(Duration::from_secs(5)) {
            error!(error = %e, "Failed to flush pending Kafka messages");
        }
        info!("Kafka connection closed");

        self.postgres_pool.close().await;
        info!("PostgreSQL pool closed");
    }
}
