//! pulse-telemetry - 可观测性库

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 分发计数器，标签 `type`、`outcome`
pub const DISPATCH_ENVELOPES_TOTAL: &str = "dispatch_envelopes_total";
/// 分发耗时直方图，标签 `type`
pub const DISPATCH_DURATION_SECONDS: &str = "dispatch_duration_seconds";
/// 结果事件发布失败计数器，标签 `topic`
pub const RESULT_PUBLISH_FAILURES_TOTAL: &str = "result_publish_failures_total";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to install Prometheus recorder: {0}")]
    Metrics(#[from] BuildError),
}

/// 初始化 tracing
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// 初始化 JSON 格式的 tracing（生产环境）
pub fn init_tracing_json(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// 按运行环境选择日志格式
pub fn init_tracing_for(production: bool, log_level: &str) {
    if production {
        init_tracing_json(log_level);
    } else {
        init_tracing(log_level);
    }
}

/// 初始化 Prometheus metrics
pub fn init_metrics() -> Result<PrometheusHandle, TelemetryError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

fn describe_metrics() {
    metrics::describe_counter!(
        DISPATCH_ENVELOPES_TOTAL,
        "Envelopes handled by the dispatch router, by type and outcome"
    );
    metrics::describe_histogram!(
        DISPATCH_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Time spent creating the entity for an envelope"
    );
    metrics::describe_counter!(
        RESULT_PUBLISH_FAILURES_TOTAL,
        "Result events that could not be published"
    );
}
