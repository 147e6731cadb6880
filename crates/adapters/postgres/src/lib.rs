//! pulse-adapter-postgres - PostgreSQL 适配器
//!
//! 连接池管理与通用的 `INSERT ... RETURNING *` 创建服务

mod connection;
mod create_service;
mod error;
mod insert;

pub use connection::*;
pub use create_service::*;
pub use error::*;
pub use insert::*;
