//! analytics-ingest Service

use std::net::SocketAddr;
use std::sync::Arc;

use analytics_ingest::{AppState, PgServices, build_registry, handle_message, routes};
use pulse_bootstrap::{Infrastructure, ShutdownController, init_runtime, shutdown_signal};
use pulse_config::AppConfig;
use pulse_event_core::{DispatchRouter, ResultTopics};
use pulse_telemetry::init_metrics;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir)?;
    init_runtime(&config);
    let metrics = init_metrics()?;

    let infra = Infrastructure::from_config(config).await?;
    let config = infra.config();

    let registry = build_registry(&PgServices::new(infra.postgres_pool()))?;

    let router = Arc::new(DispatchRouter::new(
        registry,
        infra.kafka_producer(),
        ResultTopics::new(
            config.kafka.confirmation_topic.clone(),
            config.kafka.error_topic.clone(),
        ),
    ));
    info!(
        event_types = router.registry().len(),
        confirmation_topic = %router.topics().confirmation,
        error_topic = %router.topics().error,
        "Dispatch router ready"
    );

    let shutdown = ShutdownController::new();

    let consumer = infra.kafka_consumer()?;
    info!(topic = consumer.topic(), group_id = consumer.group_id(), "Kafka consumer started");
    let consumer_router = router.clone();
    let consumer_shutdown = shutdown.signal();
    let consumer_task = tokio::spawn(async move {
        consumer
            .run(
                |message| {
                    let router = consumer_router.clone();
                    async move { handle_message(&router, message).await.map(|_| ()) }
                },
                consumer_shutdown,
            )
            .await
    });

    let signal_controller = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_controller.trigger();
    });

    let app = routes(AppState {
        router,
        health: infra.health_checker(),
        metrics,
    });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.signal())
        .await?;

    shutdown.trigger();
    match consumer_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Kafka consumer failed"),
        Err(e) => error!(error = %e, "Kafka consumer task panicked"),
    }

    infra.shutdown().await;
    info!("Service stopped");
    Ok(())
}
