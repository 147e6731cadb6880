//! pulse-event-core - 消息分发核心库
//!
//! Envelope 解码、类型注册表、分发路由与结果事件

mod envelope;
mod memory;
mod registry;
mod result_event;
mod router;

pub use envelope::*;
pub use memory::*;
pub use registry::*;
pub use result_event::*;
pub use router::*;
