//! Kafka 消息处理

use pulse_adapter_kafka::ConsumedMessage;
use pulse_errors::{AppError, AppResult};
use pulse_event_core::{DispatchOutcome, DispatchRouter, Envelope};
use pulse_ports::EventPublisher;
use tracing::{debug, error};

/// 处理一条消费到的消息
///
/// 只有无法解码的消息会返回错误（由消费者转入死信队列）；
/// 已解码的信封无论成功与否都已经通过结果事件上报。
pub async fn handle_message<P: EventPublisher>(
    router: &DispatchRouter<P>,
    message: ConsumedMessage,
) -> AppResult<DispatchOutcome> {
    let envelope = Envelope::from_slice(&message.payload).map_err(|e| {
        error!(
            topic = %message.topic,
            partition = message.partition,
            offset = message.offset,
            error = %e,
            "Undecodable message"
        );
        AppError::validation(format!("Undecodable message: {}", e))
    })?;

    let outcome = router.dispatch(envelope).await;
    debug!(offset = message.offset, outcome = outcome.as_str(), "Message handled");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pulse_event_core::{InMemoryEventBus, Registry, ResultTopics};
    use pulse_ports::CreateService;
    use serde::Serialize;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct CreateCity {
        city: String,
    }

    #[derive(Debug, Serialize)]
    struct City {
        id: i32,
        city: String,
    }

    impl pulse_ports::CreateInput for CreateCity {
        type Entity = City;
    }

    #[derive(Default)]
    struct CityStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CreateService<CreateCity> for CityStore {
        async fn create(&self, input: CreateCity) -> AppResult<City> {
            let id = self.calls.fetch_add(1, Ordering::SeqCst) as i32 + 1;
            Ok(City {
                id,
                city: input.city,
            })
        }
    }

    fn setup() -> (DispatchRouter<InMemoryEventBus>, InMemoryEventBus, Arc<CityStore>) {
        let store = Arc::new(CityStore::default());
        let registry = Registry::builder()
            .register::<CreateCity>("locations", store.clone())
            .build()
            .unwrap();
        let bus = InMemoryEventBus::new();
        let router = DispatchRouter::new(
            registry,
            Arc::new(bus.clone()),
            ResultTopics::new("confirmation-topic", "error-topic"),
        );
        (router, bus, store)
    }

    fn message(payload: &[u8]) -> ConsumedMessage {
        ConsumedMessage {
            topic: "default-topic".to_string(),
            partition: 0,
            offset: 7,
            key: None,
            payload: payload.to_vec(),
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn test_wrapped_envelope_is_dispatched() {
        let (router, bus, store) = setup();
        let payload = json!({ "message": { "type": "locations", "data": { "city": "Porto" } } });

        let outcome = handle_message(&router, message(payload.to_string().as_bytes()))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Succeeded);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        let confirmations = bus.messages_on("confirmation-topic").await;
        assert_eq!(confirmations.len(), 1);
        assert_eq!(confirmations[0]["data"]["city"], Value::from("Porto"));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_rejected_without_events() {
        let (router, bus, store) = setup();

        let err = handle_message(&router, message(b"not json")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert!(bus.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_payload_is_rejected_without_events() {
        let (router, bus, store) = setup();

        let err = handle_message(&router, message(b"")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert!(bus.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_type_is_rejected() {
        let (router, bus, _) = setup();

        let err = handle_message(&router, message(br#"{"data":{"city":"Faro"}}"#))
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Validation error: Undecodable message"));
        assert!(bus.messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_type_is_not_an_error() {
        let (router, bus, store) = setup();

        let outcome = handle_message(&router, message(br#"{"type":"unknownType","data":{}}"#))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Dropped);
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert!(bus.messages().await.is_empty());
    }
}
