//! 启动阶段的连接重试

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

/// 指数退避：每次失败后等待时间翻倍，不超过 `cap`
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// 总尝试次数（含首次）
    pub attempts: u32,
    pub base: Duration,
    pub cap: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 3,
            base: Duration::from_millis(500),
            cap: Duration::from_secs(5),
        }
    }
}

impl Backoff {
    pub fn new(attempts: u32, base: Duration, cap: Duration) -> Self {
        Self { attempts, base, cap }
    }

    /// 各次失败之后的等待时间，长度为 `attempts - 1`
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let Self { attempts, base, cap } = *self;
        (0..attempts.saturating_sub(1))
            .map(move |n| base.saturating_mul(2u32.saturating_pow(n)).min(cap))
    }
}

/// 按 `backoff` 反复执行 `connect`，用尽次数后返回最后一次的错误
pub async fn connect_with_backoff<F, Fut, T, E>(
    backoff: &Backoff,
    component: &str,
    mut connect: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = backoff.delays();
    let mut attempt = 1;

    loop {
        let err = match connect().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(component, attempt, "Connected after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        let Some(delay) = delays.next() else {
            error!(component, attempts = attempt, error = %err, "Giving up connecting");
            return Err(err);
        };

        warn!(
            component,
            attempt,
            error = %err,
            delay_ms = delay.as_millis() as u64,
            "Connection failed, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
