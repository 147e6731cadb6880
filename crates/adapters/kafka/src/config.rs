//! Kafka 客户端配置
//!
//! 由应用配置派生，转换为 rdkafka `ClientConfig` 的配置项。

use std::time::Duration;

use pulse_config::KafkaConfig;
use pulse_errors::{AppError, AppResult};
use rdkafka::config::{ClientConfig, FromClientConfig};

/// 按配置项创建 rdkafka 客户端
pub(crate) fn create_client<C: FromClientConfig>(
    entries: Vec<(String, String)>,
    role: &str,
) -> AppResult<C> {
    let mut config = ClientConfig::new();
    for (key, value) in entries {
        config.set(key, value);
    }
    config
        .create()
        .map_err(|e| AppError::external_service(format!("Failed to create Kafka {}: {}", role, e)))
}

/// 生产者与消费者共用的连接配置
#[derive(Debug, Clone)]
pub struct KafkaConnection {
    /// 逗号分隔的 broker 地址
    pub brokers: String,
    pub client_id: String,
}

impl KafkaConnection {
    pub fn new(brokers: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            client_id: client_id.into(),
        }
    }

    pub fn to_client_config_entries(&self) -> Vec<(String, String)> {
        vec![
            ("bootstrap.servers".to_string(), self.brokers.clone()),
            ("client.id".to_string(), self.client_id.clone()),
        ]
    }
}

impl From<&KafkaConfig> for KafkaConnection {
    fn from(config: &KafkaConfig) -> Self {
        Self::new(config.broker_list().join(","), &config.client_id)
    }
}

/// Producer 配置
#[derive(Debug, Clone)]
pub struct ProducerSettings {
    pub connection: KafkaConnection,
    /// 确认模式：0=不等待，1=leader确认，-1=所有副本确认
    pub acks: i32,
    pub linger_ms: u64,
    /// 单条消息的投递超时
    pub request_timeout: Duration,
}

impl ProducerSettings {
    pub fn new(connection: KafkaConnection) -> Self {
        Self {
            connection,
            acks: -1,
            linger_ms: 5,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn to_client_config_entries(&self) -> Vec<(String, String)> {
        let mut entries = self.connection.to_client_config_entries();

        entries.push(("acks".to_string(), self.acks.to_string()));
        entries.push(("linger.ms".to_string(), self.linger_ms.to_string()));
        entries.push((
            "message.timeout.ms".to_string(),
            self.request_timeout.as_millis().to_string(),
        ));

        entries
    }
}

impl From<&KafkaConfig> for ProducerSettings {
    fn from(config: &KafkaConfig) -> Self {
        Self::new(KafkaConnection::from(config))
    }
}

/// 自动偏移重置策略
#[derive(Debug, Clone, Default)]
pub enum AutoOffsetReset {
    #[default]
    Earliest,
    Latest,
}

impl AutoOffsetReset {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoOffsetReset::Earliest => "earliest",
            AutoOffsetReset::Latest => "latest",
        }
    }
}

/// Consumer 配置
#[derive(Debug, Clone)]
pub struct ConsumerSettings {
    pub connection: KafkaConnection,
    pub group_id: String,
    /// 订阅的 topic
    pub topic: String,
    pub auto_offset_reset: AutoOffsetReset,
    pub session_timeout: Duration,
    /// 是否启用 DLQ
    pub enable_dlq: bool,
    /// DLQ topic 后缀（默认 ".dlq"）
    pub dlq_suffix: String,
}

impl ConsumerSettings {
    pub fn new(
        connection: KafkaConnection,
        group_id: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            connection,
            group_id: group_id.into(),
            topic: topic.into(),
            auto_offset_reset: AutoOffsetReset::default(),
            session_timeout: Duration::from_secs(45),
            enable_dlq: true,
            dlq_suffix: ".dlq".to_string(),
        }
    }

    pub fn with_dlq(mut self, enable: bool) -> Self {
        self.enable_dlq = enable;
        self
    }

    pub fn dlq_topic(&self) -> String {
        format!("{}{}", self.topic, self.dlq_suffix)
    }

    /// 偏移量由消费循环手动提交
    pub fn to_client_config_entries(&self) -> Vec<(String, String)> {
        let mut entries = self.connection.to_client_config_entries();

        entries.push(("group.id".to_string(), self.group_id.clone()));
        entries.push(("enable.auto.commit".to_string(), "false".to_string()));
        entries.push((
            "auto.offset.reset".to_string(),
            self.auto_offset_reset.as_str().to_string(),
        ));
        entries.push((
            "session.timeout.ms".to_string(),
            self.session_timeout.as_millis().to_string(),
        ));

        entries
    }
}

impl From<&KafkaConfig> for ConsumerSettings {
    fn from(config: &KafkaConfig) -> Self {
        Self::new(KafkaConnection::from(config), &config.group_id, &config.topic)
            .with_dlq(config.enable_dlq)
    }
}
