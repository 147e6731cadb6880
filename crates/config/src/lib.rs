//! pulse-config - 配置加载库
//!
//! 加载顺序：`default.toml` → `<APP_ENV>.toml` → 环境变量。
//! 环境变量沿用既有的运维约定（`KAFKA_*`、`DB_*`）。

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 环境变量中形如数字或布尔的值会被 figment 解析成对应类型，
/// 文本字段需要原样接受它们（如 `DB_PS=1234`）。
mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Bool(bool),
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Scalar::deserialize(deserializer)? {
            Scalar::Text(s) => s,
            Scalar::Unsigned(n) => n.to_string(),
            Scalar::Signed(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        })
    }

    pub fn secret<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Secret<String>, D::Error> {
        string(deserializer).map(Secret::new)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_user", deserialize_with = "lenient::string")]
    pub user: String,
    #[serde(default = "default_db_password", deserialize_with = "lenient::secret")]
    pub password: Secret<String>,
    #[serde(default = "default_db_host", deserialize_with = "lenient::string")]
    pub host: String,
    #[serde(default = "default_db_port")]
    pub port: u16,
    #[serde(default = "default_db_name", deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// 拼接连接 URL，密码仍保持在 Secret 中
    pub fn url(&self) -> Secret<String> {
        Secret::new(format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.host,
            self.port,
            self.name
        ))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: default_db_user(),
            password: default_db_password(),
            host: default_db_host(),
            port: default_db_port(),
            name: default_db_name(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_password() -> Secret<String> {
    Secret::new("1234".to_string())
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "test".to_string()
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

/// Kafka 配置
#[derive(Debug, Clone, Deserialize)]
pub struct KafkaConfig {
    /// 逗号分隔的 broker 列表
    #[serde(default = "default_brokers", deserialize_with = "lenient::string")]
    pub brokers: String,
    #[serde(default = "default_client_id", deserialize_with = "lenient::string")]
    pub client_id: String,
    #[serde(default = "default_group_id", deserialize_with = "lenient::string")]
    pub group_id: String,
    /// 消费的 topic
    #[serde(default = "default_topic", deserialize_with = "lenient::string")]
    pub topic: String,
    /// 处理成功后的确认 topic
    #[serde(default = "default_confirmation_topic", deserialize_with = "lenient::string")]
    pub confirmation_topic: String,
    /// 处理失败后的错误 topic
    #[serde(default = "default_error_topic", deserialize_with = "lenient::string")]
    pub error_topic: String,
    /// 无法解析的消息是否转入 `<topic>.dlq`
    #[serde(default = "default_enable_dlq")]
    pub enable_dlq: bool,
}

impl KafkaConfig {
    pub fn broker_list(&self) -> Vec<&str> {
        self.brokers
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: default_brokers(),
            client_id: default_client_id(),
            group_id: default_group_id(),
            topic: default_topic(),
            confirmation_topic: default_confirmation_topic(),
            error_topic: default_error_topic(),
            enable_dlq: default_enable_dlq(),
        }
    }
}

fn default_brokers() -> String {
    "localhost:9092".to_string()
}

fn default_client_id() -> String {
    "default-client-id".to_string()
}

fn default_group_id() -> String {
    "default-group-id".to_string()
}

fn default_topic() -> String {
    "default-topic".to_string()
}

fn default_confirmation_topic() -> String {
    "confirmation-topic".to_string()
}

fn default_error_topic() -> String {
    "error-topic".to_string()
}

fn default_enable_dlq() -> bool {
    true
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host", deserialize_with = "lenient::string")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level", deserialize_with = "lenient::string")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name", deserialize_with = "lenient::string")]
    pub app_name: String,
    #[serde(default = "default_app_env", deserialize_with = "lenient::string")]
    pub app_env: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_app_name() -> String {
    "analytics-ingest".to_string()
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(config_dir))
    }

    /// 构建配置来源
    pub fn figment(config_dir: &str) -> Figment {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::raw().only(&["APP_NAME", "APP_ENV"]))
            .merge(Env::raw().only(&["LOG_LEVEL"]).map(|_| "telemetry.log_level".into()))
            // 旧变量名，优先级低于 KAFKA_GROUP_ID / SERVER_PORT
            .merge(Env::raw().only(&["KAFKA_CONSUMER_GROUP_ID"]).map(|_| "kafka.group_id".into()))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
            .merge(
                Env::prefixed("KAFKA_")
                    .filter(|key| !key.as_str().eq_ignore_ascii_case("consumer_group_id"))
                    .map(|key| format!("kafka.{}", key).into()),
            )
            .merge(Env::prefixed("SERVER_").map(|key| format!("server.{}", key).into()))
            .merge(Env::prefixed("DB_").map(|key| {
                // DB_PS 是历史遗留的密码变量名
                if key.as_str().eq_ignore_ascii_case("ps") {
                    "database.password".into()
                } else {
                    format!("database.{}", key).into()
                }
            }))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}
