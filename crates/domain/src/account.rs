//! 账户

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

/// 创建账户
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccount {
    #[serde(deserialize_with = "dates::deserialize")]
    pub registration_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub postponed_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub delete_date: NaiveDate,
    /// 最近一次登录日期
    #[serde(deserialize_with = "dates::deserialize")]
    pub sign_in_dates: NaiveDate,
    pub app: String,
    pub sign_in_method: String,
    pub user_invitations: String,
}

/// 账户（`account` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i32,
    pub registration_date: Option<NaiveDate>,
    pub postponed_date: Option<NaiveDate>,
    pub delete_date: Option<NaiveDate>,
    pub sign_in_dates: Option<NaiveDate>,
    pub app: Option<String>,
    pub sign_in_method: Option<String>,
    pub user_invitations: Option<String>,
}

impl CreateInput for CreateAccount {
    type Entity = Account;
}
