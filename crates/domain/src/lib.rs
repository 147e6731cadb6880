//! pulse-domain - 分析数据的实体类型
//!
//! 每种实体包含一个创建输入（消息体字段，camelCase）和一个持久化实体（数据库行）。

pub mod dates;

mod account;
mod billing;
mod business;
mod career;
mod client;
mod hiring;
mod invitation;
mod job_page;
mod landing_page;
mod location;
mod onboarding;
mod organization;
mod page;
mod post;
mod traffic;
mod user;

pub use account::*;
pub use billing::*;
pub use business::*;
pub use career::*;
pub use client::*;
pub use hiring::*;
pub use invitation::*;
pub use job_page::*;
pub use landing_page::*;
pub use location::*;
pub use onboarding::*;
pub use organization::*;
pub use page::*;
pub use post::*;
pub use traffic::*;
pub use user::*;
