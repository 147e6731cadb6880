//! pulse-bootstrap - 服务启动骨架
//!
//! 运行时初始化、带重试的基础设施构建、健康检查与优雅关闭

mod health;
mod infrastructure;
mod retry;
mod runtime;
mod shutdown;

pub use health::*;
pub use infrastructure::*;
pub use retry::*;
pub use runtime::*;
pub use shutdown::*;
