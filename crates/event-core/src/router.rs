//! 分发路由
//!
//! 每个信封的处理是线性的：
//! `received → resolved | unresolved(drop) → invoked → succeeded(confirm) | failed(error-emit)`。
//! 路由本身不持有跨消息的状态，重试与并发由消费者决定。

use metrics::{counter, histogram};
use pulse_errors::AppResult;
use pulse_ports::EventPublisher;
use pulse_telemetry::{
    DISPATCH_DURATION_SECONDS, DISPATCH_ENVELOPES_TOTAL, RESULT_PUBLISH_FAILURES_TOTAL,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::{Envelope, Registry, ResultEvent};

/// 结果事件发布的目标 topic
#[derive(Debug, Clone)]
pub struct ResultTopics {
    pub confirmation: String,
    pub error: String,
}

impl ResultTopics {
    pub fn new(confirmation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            confirmation: confirmation.into(),
            error: error.into(),
        }
    }
}

/// 单个信封的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 未注册的类型，只记录日志
    Dropped,
    /// 创建成功，已发送确认事件
    Succeeded,
    /// 解码或创建失败，已发送错误事件
    Failed,
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dropped => "dropped",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// 分发路由
pub struct DispatchRouter<P: EventPublisher> {
    registry: Registry,
    publisher: Arc<P>,
    topics: ResultTopics,
}

impl<P: EventPublisher> DispatchRouter<P> {
    pub fn new(registry: Registry, publisher: Arc<P>, topics: ResultTopics) -> Self {
        Self {
            registry,
            publisher,
            topics,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn topics(&self) -> &ResultTopics {
        &self.topics
    }

    /// 处理一个信封
    ///
    /// 每个已知类型的信封恰好触发一次创建尝试和一次结果发布；
    /// 未知类型不产生任何副作用。错误不会向调用方传播。
    pub async fn dispatch(&self, envelope: Envelope) -> DispatchOutcome {
        let Envelope { event_type, data } = envelope;
        debug!(event_type = %event_type, "Envelope received");

        let Some(handler) = self.registry.get(&event_type) else {
            error!(event_type = %event_type, "Unknown metric type");
            counter!(DISPATCH_ENVELOPES_TOTAL, "type" => "unknown", "outcome" => DispatchOutcome::Dropped.as_str())
                .increment(1);
            return DispatchOutcome::Dropped;
        };

        let started = Instant::now();
        let result = match handler.decode(data) {
            Ok(pending) => {
                debug!(event_type = %event_type, "Input decoded, calling service");
                pending.run().await
            }
            Err(e) => Err(e),
        };
        histogram!(DISPATCH_DURATION_SECONDS, "type" => event_type.clone())
            .record(started.elapsed().as_secs_f64());

        let outcome = match result {
            Ok(entity) => {
                info!(event_type = %event_type, "Message processed");
                let event = ResultEvent::success(event_type.as_str(), entity);
                self.emit(&self.topics.confirmation, &event).await;
                DispatchOutcome::Succeeded
            }
            Err(e) => {
                error!(event_type = %event_type, error = %e, "Failed to process message");
                let event = ResultEvent::error(event_type.as_str(), e.to_string());
                self.emit(&self.topics.error, &event).await;
                DispatchOutcome::Failed
            }
        };

        counter!(DISPATCH_ENVELOPES_TOTAL, "type" => event_type, "outcome" => outcome.as_str())
            .increment(1);
        outcome
    }

    /// 直接发布到任意 topic
    pub async fn publish<E: Serialize + Send + Sync>(&self, topic: &str, payload: &E) -> AppResult<()> {
        self.publisher.publish(topic, payload).await
    }

    async fn emit(&self, topic: &str, event: &ResultEvent) {
        match self.publisher.publish(topic, event).await {
            Ok(()) => debug!(topic = %topic, event_type = event.event_type(), "Result event published"),
            Err(e) => {
                error!(topic = %topic, event_type = event.event_type(), error = %e, "Failed to publish result event");
                counter!(RESULT_PUBLISH_FAILURES_TOTAL, "topic" => topic.to_string()).increment(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryEventBus;
    use async_trait::async_trait;
    use pulse_domain::{CreateLocation, CreateUser, Location, User};
    use pulse_errors::AppError;
    use pulse_ports::{CreateInput, CreateService};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    const CONFIRMATION: &str = "confirmation-topic";
    const ERROR: &str = "error-topic";

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
    }

    #[derive(Debug, Serialize)]
    struct SampleRow {
        id: i32,
        name: String,
    }

    impl CreateInput for Sample {
        type Entity = SampleRow;
    }

    #[derive(Default)]
    struct CountingService {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CreateService<Sample> for CountingService {
        async fn create(&self, input: Sample) -> AppResult<SampleRow> {
            let id = self.calls.fetch_add(1, Ordering::SeqCst) as i32 + 1;
            Ok(SampleRow {
                id,
                name: input.name,
            })
        }
    }

    /// 内存地点存储，自增 id
    #[derive(Default)]
    struct LocationStore {
        rows: RwLock<Vec<Location>>,
    }

    #[async_trait]
    impl CreateService<CreateLocation> for LocationStore {
        async fn create(&self, input: CreateLocation) -> AppResult<Location> {
            let mut rows = self.rows.write().await;
            let location = Location {
                id: rows.len() as i32 + 1,
                continent: Some(input.continent),
                country: Some(input.country),
                state: Some(input.state),
                city: Some(input.city),
            };
            rows.push(location.clone());
            Ok(location)
        }
    }

    #[derive(Default)]
    struct UserStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CreateService<CreateUser> for UserStore {
        async fn create(&self, input: CreateUser) -> AppResult<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if input.language.is_empty() {
                return Err(AppError::validation(
                    "null value in column \"language\" violates not-null constraint",
                ));
            }
            Ok(User {
                id: 1,
                account_id: Some(input.account_id),
                location_id: Some(input.location_id),
                language: Some(input.language),
                connections_data: Some(input.connections_data),
                onboarding_id: Some(input.onboarding_id),
            })
        }
    }

    struct FailingService;

    #[async_trait]
    impl CreateService<Sample> for FailingService {
        async fn create(&self, _input: Sample) -> AppResult<SampleRow> {
            Err(AppError::not_found("Account 42"))
        }
    }

    fn router(registry: Registry, bus: &InMemoryEventBus) -> DispatchRouter<InMemoryEventBus> {
        DispatchRouter::new(
            registry,
            Arc::new(bus.clone()),
            ResultTopics::new(CONFIRMATION, ERROR),
        )
    }

    #[test]
    fn test_router_exposes_registry_and_topics() {
        let registry = Registry::builder()
            .register::<Sample>("pages", Arc::new(CountingService::default()))
            .build()
            .unwrap();
        let router = router(registry, &InMemoryEventBus::new());

        assert_eq!(router.registry().len(), 1);
        assert!(router.registry().contains("pages"));
        assert_eq!(router.topics().confirmation, CONFIRMATION);
        assert_eq!(router.topics().error, ERROR);
    }

    #[tokio::test]
    async fn test_each_type_invokes_only_its_service() {
        let keys = ["pages", "posts", "invitations"];
        let services: Vec<Arc<CountingService>> =
            keys.iter().map(|_| Arc::new(CountingService::default())).collect();

        let mut builder = Registry::builder();
        for (key, service) in keys.iter().zip(&services) {
            builder = builder.register::<Sample>(*key, service.clone());
        }
        let bus = InMemoryEventBus::new();
        let router = router(builder.build().unwrap(), &bus);

        for (i, key) in keys.iter().enumerate() {
            let outcome = router
                .dispatch(Envelope::new(*key, json!({ "name": key })))
                .await;
            assert_eq!(outcome, DispatchOutcome::Succeeded);

            for (j, service) in services.iter().enumerate() {
                let expected = if j <= i { 1 } else { 0 };
                assert_eq!(service.calls.load(Ordering::SeqCst), expected);
            }
        }
        assert_eq!(bus.messages_on(CONFIRMATION).await.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_type_has_no_side_effects() {
        let service = Arc::new(CountingService::default());
        let registry = Registry::builder()
            .register::<Sample>("pages", service.clone())
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        let outcome = router.dispatch(Envelope::new("bogus", json!({}))).await;
        assert_eq!(outcome, DispatchOutcome::Dropped);

        // 键区分大小写
        let outcome = router.dispatch(Envelope::new("Pages", json!({ "name": "x" }))).await;
        assert_eq!(outcome, DispatchOutcome::Dropped);

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(bus.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_success_publishes_one_confirmation() {
        let registry = Registry::builder()
            .register::<Sample>("pages", Arc::new(CountingService::default()))
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        router
            .dispatch(Envelope::new("pages", json!({ "name": "Careers" })))
            .await;

        let messages = bus.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].topic, CONFIRMATION);
        assert_eq!(
            messages[0].payload,
            json!({ "status": "success", "type": "pages", "data": { "id": 1, "name": "Careers" } })
        );
    }

    #[tokio::test]
    async fn test_failure_publishes_one_error_event() {
        let registry = Registry::builder()
            .register::<Sample>("pages", Arc::new(FailingService))
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        let outcome = router
            .dispatch(Envelope::new("pages", json!({ "name": "Careers" })))
            .await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert!(bus.messages_on(CONFIRMATION).await.is_empty());
        assert_eq!(
            bus.messages_on(ERROR).await,
            vec![json!({ "status": "error", "type": "pages", "message": "Not found: Account 42" })]
        );
    }

    #[tokio::test]
    async fn test_location_scenario() {
        let registry = Registry::builder()
            .register::<CreateLocation>("locations", Arc::new(LocationStore::default()))
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        let data = json!({
            "continent": "North America",
            "country": "United States",
            "state": "California",
            "city": "San Francisco"
        });
        router.dispatch(Envelope::new("locations", data)).await;

        let confirmations = bus.messages_on(CONFIRMATION).await;
        assert_eq!(confirmations.len(), 1);
        assert_eq!(
            confirmations[0]["data"],
            json!({
                "id": 1,
                "continent": "North America",
                "country": "United States",
                "state": "California",
                "city": "San Francisco"
            })
        );
    }

    #[tokio::test]
    async fn test_user_missing_fields_scenario() {
        let store = Arc::new(UserStore::default());
        let registry = Registry::builder()
            .register::<CreateUser>("users", store.clone())
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        let outcome = router
            .dispatch(Envelope::new("users", json!({ "accountId": 1 })))
            .await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert!(bus.messages_on(CONFIRMATION).await.is_empty());

        let errors = bus.messages_on(ERROR).await;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["type"], "users");
        let message = errors[0]["message"].as_str().unwrap();
        assert!(message.starts_with("Validation error:"));
        assert!(message.contains("locationId"));
    }

    #[tokio::test]
    async fn test_storage_validation_failure_is_reported() {
        let store = Arc::new(UserStore::default());
        let registry = Registry::builder()
            .register::<CreateUser>("users", store.clone())
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        let data = json!({
            "accountId": 1,
            "locationId": 2,
            "language": "",
            "connectionsData": "{}",
            "onboardingId": 3
        });
        let outcome = router.dispatch(Envelope::new("users", data)).await;

        assert_eq!(outcome, DispatchOutcome::Failed);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        let errors = bus.messages_on(ERROR).await;
        assert!(errors[0]["message"]
            .as_str()
            .unwrap()
            .contains("violates not-null constraint"));
    }

    #[tokio::test]
    async fn test_redelivery_creates_duplicates() {
        let store = Arc::new(LocationStore::default());
        let registry = Registry::builder()
            .register::<CreateLocation>("locations", store.clone())
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        let envelope = Envelope::new(
            "locations",
            json!({ "continent": "Europe", "country": "Portugal", "state": "Lisbon", "city": "Lisbon" }),
        );
        router.dispatch(envelope.clone()).await;
        router.dispatch(envelope).await;

        let rows = store.rows.read().await;
        assert_eq!(rows.len(), 2);
        assert_ne!(rows[0].id, rows[1].id);
        assert_eq!(bus.messages_on(CONFIRMATION).await.len(), 2);
    }

    #[tokio::test]
    async fn test_publish_failure_is_swallowed() {
        let service = Arc::new(CountingService::default());
        let registry = Registry::builder()
            .register::<Sample>("pages", service.clone())
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        bus.set_unavailable(true);
        let router = router(registry, &bus);

        let outcome = router
            .dispatch(Envelope::new("pages", json!({ "name": "Careers" })))
            .await;

        assert_eq!(outcome, DispatchOutcome::Succeeded);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert!(bus.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_publish_passes_through() {
        let registry = Registry::builder().build().unwrap();
        let bus = InMemoryEventBus::new();
        let router = router(registry, &bus);

        router
            .publish("default-topic", &json!({ "type": "users", "data": {} }))
            .await
            .unwrap();

        assert_eq!(
            bus.messages_on("default-topic").await,
            vec![json!({ "type": "users", "data": {} })]
        );
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let result = Registry::builder()
            .register::<Sample>("pages", Arc::new(CountingService::default()))
            .register::<Sample>("pages", Arc::new(CountingService::default()))
            .build();

        let err = result.unwrap_err();
        assert!(err.to_string().contains("pages"));
    }
}
