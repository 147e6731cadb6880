//! 地理位置

use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

/// 创建地理位置
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocation {
    pub continent: String,
    pub country: String,
    pub state: String,
    pub city: String,
}

/// 地理位置（`locations` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i32,
    pub continent: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl CreateInput for CreateLocation {
    type Entity = Location;
}
