use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganization {
    pub organization_name: String,
    pub organization_type: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub create_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub update_date: NaiveDate,
    pub user_id: i32,
}

/// 组织（`organizations` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i32,
    pub organization_name: Option<String>,
    pub organization_type: Option<String>,
    pub create_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreateOrganization {
    type Entity = Organization;
}
