//! 用户帖子

use chrono::NaiveDate;
use pulse_ports::CreateInput;
use serde::{Deserialize, Serialize};

use crate::dates;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub post_type: String,
    pub content: String,
    #[serde(deserialize_with = "dates::deserialize")]
    pub create_date: NaiveDate,
    #[serde(deserialize_with = "dates::deserialize")]
    pub update_date: NaiveDate,
    pub views: i32,
    pub comments: i32,
    pub likes: i32,
    pub user_id: i32,
}

/// 帖子（`posts` 表）
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub post_type: Option<String>,
    pub content: Option<String>,
    pub create_date: Option<NaiveDate>,
    pub update_date: Option<NaiveDate>,
    pub views: Option<i32>,
    pub comments: Option<i32>,
    pub likes: Option<i32>,
    pub user_id: Option<i32>,
}

impl CreateInput for CreatePost {
    type Entity = Post;
}
