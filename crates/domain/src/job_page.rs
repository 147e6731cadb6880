//! 职位主页

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPage {
    pub page_name: String,
    pub page_description: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub create_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub update_date: NaiveDate,
    pub views: i32,
    pub applications: i32,
    pub user_id: i32,
}

/// 职位主页（`job_page` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub id: i32,
    pub page_name: Option<String>,
    pub page_description: Option<String>,
    pub create_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    pub views: Option<i32>,
    pub applications: Option<i32>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreateJobPage {
    type Entity = JobPage;
}
