//! 账单
//!
//! 金额列为 `decimal(10, 2)`，使用 `Decimal` 避免浮点误差。
//! 输入接受 JSON 数字或字符串（`100.5` / `"100.50"`）。

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates;

/// 创建账单记录
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBilling {
    #[serde(deserialize_with = "dates::deserialize")]
    pub payment_dates: NaiveDate,
    pub payment_sum: Decimal,
    pub failed_payment: bool,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub failed_payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub failed_payment_sum: Option<Decimal>,
    pub failed_payment_paused_account: bool,
    pub billing_monthly_budget: Decimal,
    pub business_account_id: i32,
}

/// 账单（`billing` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub id: i32,
    pub payment_dates: Option<NaiveDate>,
    pub payment_sum: Option<Decimal>,
    pub failed_payment: Option<bool>,
    pub failed_payment_date: Option<NaiveDate>,
    pub failed_payment_sum: Option<Decimal>,
    pub failed_payment_paused_account: Option<bool>,
    pub billing_monthly_budget: Option<Decimal>,
    pub business_account_id: Option<i32>,
}

impl CreateInput for CreateBilling {
    type Entity = Billing;
}
