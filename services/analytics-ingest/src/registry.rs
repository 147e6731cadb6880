//! 事件类型到创建服务的绑定

use std::sync::Arc;

use pulse_adapter_postgres::{PgCreateService, PgInsert};
use pulse_domain::*;
use pulse_errors::AppResult;
use pulse_event_core::Registry;
use pulse_ports::CreateService;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

/// 已注册的事件类型（与生产方的消息约定一致）
pub const EVENT_TYPES: [&str; 19] = [
    "users",
    "onboarding",
    "account",
    "landingPages",
    "businessAccounts",
    "careerPages",
    "careerPosts",
    "traffic",
    "clients",
    "billing",
    "businessCompanies",
    "jobPages",
    "hiring",
    "locations",
    "businessJobs",
    "organizations",
    "pages",
    "invitations",
    "posts",
];

/// 按输入类型提供创建服务
pub trait ServiceFactory {
    fn service<I>(&self) -> Arc<dyn CreateService<I>>
    where
        I: PgInsert,
        I::Entity: for<'r> FromRow<'r, PgRow> + Unpin;
}

/// 所有实体共用一个连接池
pub struct PgServices {
    pool: PgPool,
}

impl PgServices {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ServiceFactory for PgServices {
    fn service<I>(&self) -> Arc<dyn CreateService<I>>
    where
        I: PgInsert,
        I::Entity: for<'r> FromRow<'r, PgRow> + Unpin,
    {
        Arc::new(PgCreateService::<I>::new(self.pool.clone()))
    }
}

/// 构建注册表，启动时调用一次
pub fn build_registry<F: ServiceFactory>(services: &F) -> AppResult<Registry> {
    Registry::builder()
        .register::<CreateUser>("users", services.service())
        .register::<CreateOnboarding>("onboarding", services.service())
        .register::<CreateAccount>("account", services.service())
        .register::<CreateLandingPage>("landingPages", services.service())
        .register::<CreateBusinessAccount>("businessAccounts", services.service())
        .register::<CreateCareerPage>("careerPages", services.service())
        .register::<CreateCareerPost>("careerPosts", services.service())
        .register::<CreateTraffic>("traffic", services.service())
        .register::<CreateClient>("clients", services.service())
        .register::<CreateBilling>("billing", services.service())
        .register::<CreateBusinessCompany>("businessCompanies", services.service())
        .register::<CreateJobPage>("jobPages", services.service())
        .register::<CreateHiring>("hiring", services.service())
        .register::<CreateLocation>("locations", services.service())
        .register::<CreateBusinessJob>("businessJobs", services.service())
        .register::<CreateOrganization>("organizations", services.service())
        .register::<CreatePage>("pages", services.service())
        .register::<CreateInvitation>("invitations", services.service())
        .register::<CreatePost>("posts", services.service())
        .build()
}
