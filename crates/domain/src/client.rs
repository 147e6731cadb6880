//! 付费客户

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

/// 创建客户订阅记录
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    pub current_plan: String,
    pub free: bool,
    pub premium_trial: bool,
    pub premium: bool,
    #[serde(deserialize_with = "dates::deserialize")]
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub end_date: NaiveDate,
    pub business_account_id: i32,
}

/// 客户（`client` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i32,
    pub current_plan: Option<String>,
    pub free: Option<bool>,
    pub premium_trial: Option<bool>,
    pub premium: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub business_account_id: Option<i32>,
}

impl CreateInput for CreateClient {
    type Entity = Client;
}
