//! HTTP 接口

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use pulse_bootstrap::{HealthChecker, HealthStatus};
use pulse_errors::{AppError, AppResult};
use pulse_event_core::DispatchRouter;
use pulse_ports::EventPublisher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::info;

/// 路由共享状态
pub struct AppState<P: EventPublisher> {
    pub router: Arc<DispatchRouter<P>>,
    pub health: HealthChecker,
    pub metrics: PrometheusHandle,
}

impl<P: EventPublisher> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            health: self.health.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

pub fn routes<P: EventPublisher + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/kafka/send", post(send_message::<P>))
        .route("/health", get(health_check::<P>))
        .route("/ready", get(readiness_check::<P>))
        .route("/metrics", get(render_metrics::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub topic: String,
    pub message: Value,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub topic: String,
}

/// 把任意 JSON 转发到指定 topic，不经过本地分发
async fn send_message<P: EventPublisher>(
    State(state): State<AppState<P>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SendMessageResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;

    if request.topic.trim().is_empty() {
        return Err(AppError::validation("topic must not be empty"));
    }

    state.router.publish(&request.topic, &request.message).await?;
    info!(topic = %request.topic, "Message forwarded");

    Ok((
        StatusCode::ACCEPTED,
        Json(SendMessageResponse {
            topic: request.topic,
        }),
    ))
}

async fn health_check<P: EventPublisher>(State(state): State<AppState<P>>) -> Json<HealthStatus> {
    Json(state.health.liveness())
}

async fn readiness_check<P: EventPublisher>(
    State(state): State<AppState<P>>,
) -> (StatusCode, Json<HealthStatus>) {
    let status = state.health.readiness().await;
    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn render_metrics<P: EventPublisher>(State(state): State<AppState<P>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pulse_bootstrap::{ComponentHealth, ReadinessCheck};
    use pulse_event_core::{InMemoryEventBus, Registry, ResultTopics};
    use serde_json::json;
    use tower::ServiceExt;

    struct Fixed(bool);

    #[async_trait]
    impl ReadinessCheck for Fixed {
        async fn check(&self) -> ComponentHealth {
            if self.0 {
                ComponentHealth::healthy("postgres")
            } else {
                ComponentHealth::unhealthy("kafka", "broker unreachable")
            }
        }
    }

    fn app(bus: &InMemoryEventBus, health: HealthChecker) -> Router {
        let router = DispatchRouter::new(
            Registry::builder().build().unwrap(),
            Arc::new(bus.clone()),
            ResultTopics::new("confirmation-topic", "error-topic"),
        );
        routes(AppState {
            router: Arc::new(router),
            health,
            metrics: PrometheusBuilder::new().build_recorder().handle(),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_send_forwards_message_without_dispatch() {
        let bus = InMemoryEventBus::new();
        let app = app(&bus, HealthChecker::new());
        let message = json!({ "type": "locations", "data": { "city": "Braga" } });

        let response = app
            .oneshot(post_json(
                "/kafka/send",
                json!({ "topic": "default-topic", "message": message }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_json(response).await, json!({ "topic": "default-topic" }));

        let published = bus.messages().await;
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].topic, "default-topic");
        assert_eq!(published[0].payload, message);
    }

    #[tokio::test]
    async fn test_send_rejects_empty_topic() {
        let bus = InMemoryEventBus::new();
        let app = app(&bus, HealthChecker::new());

        let response = app
            .oneshot(post_json("/kafka/send", json!({ "topic": " ", "message": {} })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/problem+json"
        );
        assert!(bus.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_rejects_malformed_body() {
        let bus = InMemoryEventBus::new();
        let app = app(&bus, HealthChecker::new());

        let response = app
            .oneshot(post_json("/kafka/send", json!({ "message": {} })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_send_reports_bus_failure() {
        let bus = InMemoryEventBus::new();
        bus.set_unavailable(true);
        let app = app(&bus, HealthChecker::new());

        let response = app
            .oneshot(post_json("/kafka/send", json!({ "topic": "t", "message": 1 })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let app = app(&InMemoryEventBus::new(), HealthChecker::new());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_ready_is_503_when_a_check_fails() {
        let health = HealthChecker::new()
            .with_check(Arc::new(Fixed(true)))
            .with_check(Arc::new(Fixed(false)));
        let app = app(&InMemoryEventBus::new(), health);

        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ready_is_200_when_all_pass() {
        let health = HealthChecker::new().with_check(Arc::new(Fixed(true)));
        let app = app(&InMemoryEventBus::new(), health);

        let response = app
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_endpoint_is_plain_text() {
        let app = app(&InMemoryEventBus::new(), HealthChecker::new());

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
    }
}
