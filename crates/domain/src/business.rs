//! 企业账户、企业公司与企业职位

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

/// 创建企业账户
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessAccount {
    pub account_id: i32,
    pub onboarding_id: i32,
    pub business_name: String,
    pub business_type: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub created_at: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub updated_at: NaiveDate,
}

/// 企业账户（`business_account` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BusinessAccount {
    pub id: i32,
    pub account_id: Option<i32>,
    pub onboarding_id: Option<i32>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub created_at: Option<NaiveDate>,
    pub updated_at: Option<NaiveDate>,
}

impl CreateInput for CreateBusinessAccount {
    type Entity = BusinessAccount;
}

/// 创建企业公司
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessCompany {
    pub business_account_id: i32,
    #[serde(deserialize_with = "dates::deserialize")]
    pub create_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub update_date: NaiveDate,
    pub location_id: i32,
    #[serde(rename = "type")]
    pub company_type: String,
    pub company_page_views: i32,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub business_active_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub business_paused_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub business_deleted_date: Option<NaiveDate>,
    pub user_id: i32,
}

/// 企业公司（`business_companies` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BusinessCompany {
    pub id: i32,
    pub business_account_id: Option<i32>,
    pub create_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    pub location_id: Option<i32>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub company_type: Option<String>,
    pub company_page_views: Option<i32>,
    pub business_active_date: Option<NaiveDate>,
    pub business_paused_date: Option<NaiveDate>,
    pub business_deleted_date: Option<NaiveDate>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreateBusinessCompany {
    type Entity = BusinessCompany;
}

/// 创建企业职位
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBusinessJob {
    pub company_id: i32,
    pub business_account_id: i32,
    #[serde(deserialize_with = "dates::deserialize")]
    pub publish_date: NaiveDate,
    pub location_id: i32,
    pub job_page_id: i32,
    /// 是否仍在招聘
    pub hiring: bool,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub job_active_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub job_paused_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub job_deleted_date: Option<NaiveDate>,
    pub user_id: i32,
}

/// 企业职位（`business_jobs` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BusinessJob {
    pub id: i32,
    pub company_id: Option<i32>,
    pub business_account_id: Option<i32>,
    pub publish_date: Option<NaiveDate>,
    pub location_id: Option<i32>,
    pub job_page_id: Option<i32>,
    pub hiring: Option<bool>,
    pub job_active_date: Option<NaiveDate>,
    pub job_paused_date: Option<NaiveDate>,
    pub job_deleted_date: Option<NaiveDate>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreateBusinessJob {
    type Entity = BusinessJob;
}
