//! ports - 抽象 trait 层
//!
//! 定义分发路由依赖的基础设施接口

mod create_service;
mod event_publisher;

pub use create_service::*;
pub use event_publisher::*;
