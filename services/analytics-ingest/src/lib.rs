//! analytics-ingest - 分析事件接入服务
//!
//! 从 Kafka 消费 `{ type, data }` 信封，按类型写入 PostgreSQL，并把结果事件发回 Kafka。

pub mod api;
pub mod ingest;
pub mod registry;

pub use api::{AppState, routes};
pub use ingest::handle_message;
pub use registry::{EVENT_TYPES, PgServices, ServiceFactory, build_registry};
