use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOnboarding {
    pub steps_completed: i32,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub complete_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Onboarding {
    pub id: i32,
    pub steps_completed: Option<i32>,
    pub complete_date: Option<NaiveDate>,
}

impl CreateInput for CreateOnboarding {
    type Entity = Onboarding;
}
