//! 健康检查模块
//!
//! liveness 只表示进程在运行；readiness 检查每个依赖

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::join_all;
use pulse_adapter_kafka::KafkaBrokerCheck;
use pulse_adapter_postgres::check_connection;
use serde::Serialize;
use sqlx::PgPool;

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: None,
            checks: vec![],
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy".to_string();
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "healthy".to_string(),
            message: None,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: "unhealthy".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 单个依赖的就绪检查
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn check(&self) -> ComponentHealth;
}

/// PostgreSQL：`SELECT 1`
pub struct PostgresReadiness {
    pool: PgPool,
}

impl PostgresReadiness {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadinessCheck for PostgresReadiness {
    async fn check(&self) -> ComponentHealth {
        match check_connection(&self.pool).await {
            Ok(()) => ComponentHealth::healthy("postgres"),
            Err(e) => ComponentHealth::unhealthy("postgres", e.to_string()),
        }
    }
}

/// Kafka：拉取 broker 元数据
pub struct KafkaReadiness {
    checker: Arc<KafkaBrokerCheck>,
}

impl KafkaReadiness {
    pub fn new(checker: Arc<KafkaBrokerCheck>) -> Self {
        Self { checker }
    }
}

#[async_trait]
impl ReadinessCheck for KafkaReadiness {
    async fn check(&self) -> ComponentHealth {
        match self.checker.clone().check_blocking().await {
            Ok(_) => ComponentHealth::healthy("kafka"),
            Err(e) => ComponentHealth::unhealthy("kafka", e.to_string()),
        }
    }
}

/// 健康检查器
#[derive(Clone, Default)]
pub struct HealthChecker {
    checks: Vec<Arc<dyn ReadinessCheck>>,
}

impl HealthChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
        self.checks.push(check);
        self
    }

    /// 执行存活检查（liveness）
    pub fn liveness(&self) -> HealthStatus {
        HealthStatus::healthy().with_version(env!("CARGO_PKG_VERSION"))
    }

    /// 执行就绪检查（readiness）
    pub async fn readiness(&self) -> HealthStatus {
        let results = join_all(self.checks.iter().map(|check| check.check())).await;

        let mut status = HealthStatus::healthy();
        for check in results {
            status.add_check(check);
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ComponentHealth);

    #[async_trait]
    impl ReadinessCheck for Fixed {
        async fn check(&self) -> ComponentHealth {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_readiness_all_healthy() {
        let checker = HealthChecker::new()
            .with_check(Arc::new(Fixed(ComponentHealth::healthy("postgres"))))
            .with_check(Arc::new(Fixed(ComponentHealth::healthy("kafka"))));

        let status = checker.readiness().await;
        assert!(status.is_healthy());
        assert_eq!(status.checks.len(), 2);
        assert_eq!(status.checks[0].name, "postgres");
    }

    #[tokio::test]
    async fn test_readiness_one_unhealthy() {
        let checker = HealthChecker::new()
            .with_check(Arc::new(Fixed(ComponentHealth::healthy("postgres"))))
            .with_check(Arc::new(Fixed(ComponentHealth::unhealthy(
                "kafka",
                "Broker transport failure",
            ))));

        let status = checker.readiness().await;
        assert!(!status.is_healthy());

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["checks"][1]["message"], "Broker transport failure");
    }

    #[test]
    fn test_liveness_reports_version() {
        let status = HealthChecker::new().liveness();
        assert!(status.is_healthy());
        assert!(status.version.is_some());
    }
}
