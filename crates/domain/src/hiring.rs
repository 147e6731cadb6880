//! 招聘流程统计

use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHiring {
    pub candidates: i32,
    pub active_candidates: i32,
    pub disqualified_candidates: i32,
    pub number_of_stages: i32,
    /// 关联的企业职位
    pub job_id: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hiring {
    pub id: i32,
    pub candidates: Option<i32>,
    pub active_candidates: Option<i32>,
    pub disqualified_candidates: Option<i32>,
    pub number_of_stages: Option<i32>,
    pub job_id: Option<i32>,
}

impl CreateInput for CreateHiring {
    type Entity = Hiring;
}
