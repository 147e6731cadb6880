use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTraffic {
    /// 来源渠道，如 `google`、`newsletter`
    pub traffic_source: String,
    pub location_id: i32,
    pub landing_page_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Traffic {
    pub id: i32,
    pub traffic_source: Option<String>,
    pub location_id: Option<i32>,
    pub landing_page_id: Option<i32>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreateTraffic {
    type Entity = Traffic;
}
