//! Graceful Shutdown

use std::future::Future;
use tokio::sync::watch;
use tracing::info;

/// Shutdown 控制器
///
/// 一次触发，所有等待方（HTTP 服务、消费循环）都会收到，包括触发之后才开始等待的。
#[derive(Clone)]
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// 触发关闭
    pub fn trigger(&self) {
        info!("Triggering shutdown");
        self.sender.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.sender.borrow()
    }

    /// 等待关闭的 future
    pub fn signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut receiver = self.sender.subscribe();
        async move {
            // 发送端被丢弃时同样视为关闭
            let _ = receiver.wait_for(|triggered| *triggered).await;
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
