//! 类型注册表
//!
//! 启动时构建一次，之后只读，可在并发分发之间无锁共享。

use async_trait::async_trait;
use pulse_errors::{AppError, AppResult};
use pulse_ports::{CreateInput, CreateService};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// 类型擦除后的注册项：解码输入并调用创建服务
pub(crate) trait Handler: Send + Sync {
    /// 将 `data` 解码为具体输入类型
    fn decode(&self, data: Value) -> AppResult<Box<dyn PendingCreate>>;
}

/// 已解码、尚未执行的创建调用
#[async_trait]
pub(crate) trait PendingCreate: Send {
    async fn run(self: Box<Self>) -> AppResult<Value>;
}

struct TypedHandler<I: CreateInput> {
    service: Arc<dyn CreateService<I>>,
}

struct TypedCreate<I: CreateInput> {
    service: Arc<dyn CreateService<I>>,
    input: I,
}

impl<I: CreateInput> Handler for TypedHandler<I> {
    fn decode(&self, data: Value) -> AppResult<Box<dyn PendingCreate>> {
        let input: I = serde_json::from_value(data)
            .map_err(|e| AppError::validation(format!("Invalid payload: {}", e)))?;

        Ok(Box::new(TypedCreate {
            service: self.service.clone(),
            input,
        }))
    }
}

#[async_trait]
impl<I: CreateInput> PendingCreate for TypedCreate<I> {
    async fn run(self: Box<Self>) -> AppResult<Value> {
        let TypedCreate { service, input } = *self;
        let entity = service.create(input).await?;
        serde_json::to_value(&entity)
            .map_err(|e| AppError::internal(format!("Failed to serialize entity: {}", e)))
    }
}

/// `type` 到创建操作的映射，键区分大小写
pub struct Registry {
    entries: HashMap<String, Box<dyn Handler>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.entries.contains_key(event_type)
    }

    /// 已注册的全部类型（无序）
    pub fn event_types(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, event_type: &str) -> Option<&dyn Handler> {
        self.entries.get(event_type).map(|handler| handler.as_ref())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys = self.event_types();
        keys.sort_unstable();
        f.debug_struct("Registry").field("event_types", &keys).finish()
    }
}

/// Registry 构建器
#[derive(Default)]
pub struct RegistryBuilder {
    entries: HashMap<String, Box<dyn Handler>>,
    duplicates: Vec<String>,
}

impl RegistryBuilder {
    /// 注册一种实体的创建服务
    pub fn register<I: CreateInput>(
        mut self,
        event_type: impl Into<String>,
        service: Arc<dyn CreateService<I>>,
    ) -> Self {
        let event_type = event_type.into();
        if self.entries.contains_key(&event_type) {
            self.duplicates.push(event_type);
            return self;
        }

        self.entries
            .insert(event_type, Box::new(TypedHandler { service }));
        self
    }

    /// 构建只读注册表，重复的键视为配置错误
    pub fn build(self) -> AppResult<Registry> {
        if !self.duplicates.is_empty() {
            return Err(AppError::internal(format!(
                "Duplicate registry keys: {}",
                self.duplicates.join(", ")
            )));
        }

        Ok(Registry {
            entries: self.entries,
        })
    }
}
