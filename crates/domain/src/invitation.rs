//! 邀请

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

/// 创建邀请记录
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitation {
    #[serde(deserialize_with = "dates::deserialize")]
    pub sent_date: NaiveDate,
    /// 尚未接受时为空
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub accepted_date: Option<NaiveDate>,
    pub status: String,
    pub user_id: i32,
}

/// 邀请（`invitations` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: i32,
    pub sent_date: Option<NaiveDate>,
    pub accepted_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreateInvitation {
    type Entity = Invitation;
}
