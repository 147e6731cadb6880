//! 领域创建服务 trait 定义

use async_trait::async_trait;
use pulse_errors::AppResult;
use serde::{Serialize, de::DeserializeOwned};

/// 可由消息体反序列化得到的创建输入
pub trait CreateInput: DeserializeOwned + Send + Sync + 'static {
    /// 持久化后返回的实体
    type Entity: Serialize + Send + Sync + 'static;
}

/// 每种实体一个的创建服务
#[async_trait]
pub trait CreateService<I: CreateInput>: Send + Sync {
    async fn create(&self, input: I) -> AppResult<I::Entity>;
}
