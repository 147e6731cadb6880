//! 用户

use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

/// 创建用户
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub account_id: i32,
    pub location_id: i32,
    /// 首选语言，如 `en`
    pub language: String,
    /// 连接关系数据，生产者以字符串形式发送
    pub connections_data: String,
    pub onboarding_id: i32,
}

/// 用户（`users` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub account_id: Option<i32>,
    pub location_id: Option<i32>,
    pub language: Option<String>,
    pub connections_data: Option<String>,
    pub onboarding_id: Option<i32>,
}

impl CreateInput for CreateUser {
    type Entity = User;
}
