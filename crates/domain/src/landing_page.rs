//! 落地页访问

use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandingPage {
    pub page_type: String,
    /// 会话时长（秒）
    pub session_time: i32,
    pub number_of_page_visited: i32,
}

/// 落地页访问（`landing_page` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LandingPage {
    pub id: i32,
    pub page_type: Option<String>,
    pub session_time: Option<i32>,
    pub number_of_page_visited: Option<i32>,
}

impl CreateInput for CreateLandingPage {
    type Entity = LandingPage;
}
