//! 招聘主页与招聘帖子

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCareerPage {
    pub user_id: i32,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub delete_date: Option<NaiveDate>,
    pub page_type: String,
    /// `public` 或 `private`
    pub public_private: String,
    pub views: i32,
    pub members: i32,
}

/// 招聘主页（`career_pages` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CareerPage {
    pub id: i32,
    pub user_id: Option<i32>,
    pub delete_date: Option<NaiveDate>,
    pub page_type: Option<String>,
    pub public_private: Option<String>,
    pub views: Option<i32>,
    pub members: Option<i32>,
}

impl CreateInput for CreateCareerPage {
    type Entity = CareerPage;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCareerPost {
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub create_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::option::deserialize")]
    pub delete_date: Option<NaiveDate>,
    pub views: i32,
    pub comments: i32,
    pub likes: i32,
    pub career_page_id: i32,
}

/// 招聘帖子（`career_posts` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CareerPost {
    pub id: i32,
    pub create_date: Option<NaiveDate>,
    pub delete_date: Option<NaiveDate>,
    pub views: Option<i32>,
    pub comments: Option<i32>,
    pub likes: Option<i32>,
    pub career_page_id: Option<i32>,
}

impl CreateInput for CreateCareerPost {
    type Entity = CareerPost;
}
