//! 实体到表的插入映射
//!
//! 每种创建输入声明目标表、列顺序以及按同样顺序绑定的值。
//! `id` 由数据库生成，不在列表中。

use pulse_domain::*;
use pulse_ports::CreateInput;
use sqlx::Postgres;
use sqlx::query_builder::{QueryBuilder, Separated};

/// 可插入 PostgreSQL 的创建输入
pub trait PgInsert: CreateInput {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    /// 按 `COLUMNS` 的顺序绑定值
    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>);
}

/// 构建 `INSERT INTO <table> (<columns>) VALUES (<binds>) RETURNING *`
pub fn insert_query<I: PgInsert>(input: I) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("INSERT INTO {} (", I::TABLE));
    builder.push(I::COLUMNS.join(", "));
    builder.push(") VALUES (");
    {
        let mut binds = builder.separated(", ");
        input.push_binds(&mut binds);
    }
    builder.push(") RETURNING *");
    builder
}

impl PgInsert for CreateAccount {
    const TABLE: &'static str = "account";
    const COLUMNS: &'static [&'static str] = &[
        "registration_date",
        "postponed_date",
        "delete_date",
        "sign_in_dates",
        "app",
        "sign_in_method",
        "user_invitations",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.registration_date)
            .push_bind(self.postponed_date)
            .push_bind(self.delete_date)
            .push_bind(self.sign_in_dates)
            .push_bind(self.app)
            .push_bind(self.sign_in_method)
            .push_bind(self.user_invitations);
    }
}

impl PgInsert for CreateUser {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "account_id",
        "location_id",
        "language",
        "connections_data",
        "onboarding_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.account_id)
            .push_bind(self.location_id)
            .push_bind(self.language)
            .push_bind(self.connections_data)
            .push_bind(self.onboarding_id);
    }
}

impl PgInsert for CreateOnboarding {
    const TABLE: &'static str = "onboarding";
    const COLUMNS: &'static [&'static str] = &["steps_completed", "complete_date"];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.steps_completed)
            .push_bind(self.complete_date);
    }
}

impl PgInsert for CreateLocation {
    const TABLE: &'static str = "locations";
    const COLUMNS: &'static [&'static str] = &["continent", "country", "state", "city"];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.continent)
            .push_bind(self.country)
            .push_bind(self.state)
            .push_bind(self.city);
    }
}

impl PgInsert for CreateLandingPage {
    const TABLE: &'static str = "landing_page";
    const COLUMNS: &'static [&'static str] =
        &["page_type", "session_time", "number_of_page_visited"];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.page_type)
            .push_bind(self.session_time)
            .push_bind(self.number_of_page_visited);
    }
}

impl PgInsert for CreateBusinessAccount {
    const TABLE: &'static str = "business_account";
    const COLUMNS: &'static [&'static str] = &[
        "account_id",
        "onboarding_id",
        "business_name",
        "business_type",
        "created_at",
        "updated_at",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.account_id)
            .push_bind(self.onboarding_id)
            .push_bind(self.business_name)
            .push_bind(self.business_type)
            .push_bind(self.created_at)
            .push_bind(self.updated_at);
    }
}

impl PgInsert for CreateCareerPage {
    const TABLE: &'static str = "career_pages";
    const COLUMNS: &'static [&'static str] = &[
        "user_id",
        "delete_date",
        "page_type",
        "public_private",
        "views",
        "members",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.user_id)
            .push_bind(self.delete_date)
            .push_bind(self.page_type)
            .push_bind(self.public_private)
            .push_bind(self.views)
            .push_bind(self.members);
    }
}

impl PgInsert for CreateCareerPost {
    const TABLE: &'static str = "career_posts";
    const COLUMNS: &'static [&'static str] = &[
        "create_date",
        "delete_date",
        "views",
        "comments",
        "likes",
        "career_page_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.create_date)
            .push_bind(self.delete_date)
            .push_bind(self.views)
            .push_bind(self.comments)
            .push_bind(self.likes)
            .push_bind(self.career_page_id);
    }
}

impl PgInsert for CreateTraffic {
    const TABLE: &'static str = "traffic";
    const COLUMNS: &'static [&'static str] =
        &["traffic_source", "location_id", "landing_page_id", "user_id"];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.traffic_source)
            .push_bind(self.location_id)
            .push_bind(self.landing_page_id)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreateClient {
    const TABLE: &'static str = "client";
    const COLUMNS: &'static [&'static str] = &[
        "current_plan",
        "free",
        "premium_trial",
        "premium",
        "start_date",
        "end_date",
        "business_account_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.current_plan)
            .push_bind(self.free)
            .push_bind(self.premium_trial)
            .push_bind(self.premium)
            .push_bind(self.start_date)
            .push_bind(self.end_date)
            .push_bind(self.business_account_id);
    }
}

impl PgInsert for CreateBilling {
    const TABLE: &'static str = "billing";
    const COLUMNS: &'static [&'static str] = &[
        "payment_dates",
        "payment_sum",
        "failed_payment",
        "failed_payment_date",
        "failed_payment_sum",
        "failed_payment_paused_account",
        "billing_monthly_budget",
        "business_account_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.payment_dates)
            .push_bind(self.payment_sum)
            .push_bind(self.failed_payment)
            .push_bind(self.failed_payment_date)
            .push_bind(self.failed_payment_sum)
            .push_bind(self.failed_payment_paused_account)
            .push_bind(self.billing_monthly_budget)
            .push_bind(self.business_account_id);
    }
}

impl PgInsert for CreateBusinessCompany {
    const TABLE: &'static str = "business_companies";
    const COLUMNS: &'static [&'static str] = &[
        "business_account_id",
        "create_date",
        "update_date",
        "location_id",
        "type",
        "company_page_views",
        "business_active_date",
        "business_paused_date",
        "business_deleted_date",
        "user_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.business_account_id)
            .push_bind(self.create_date)
            .push_bind(self.update_date)
            .push_bind(self.location_id)
            .push_bind(self.company_type)
            .push_bind(self.company_page_views)
            .push_bind(self.business_active_date)
            .push_bind(self.business_paused_date)
            .push_bind(self.business_deleted_date)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreateJobPage {
    const TABLE: &'static str = "job_page";
    const COLUMNS: &'static [&'static str] = &[
        "page_name",
        "page_description",
        "create_date",
        "update_date",
        "views",
        "applications",
        "user_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.page_name)
            .push_bind(self.page_description)
            .push_bind(self.create_date)
            .push_bind(self.update_date)
            .push_bind(self.views)
            .push_bind(self.applications)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreateBusinessJob {
    const TABLE: &'static str = "business_jobs";
    const COLUMNS: &'static [&'static str] = &[
        "company_id",
        "business_account_id",
        "publish_date",
        "location_id",
        "job_page_id",
        "hiring",
        "job_active_date",
        "job_paused_date",
        "job_deleted_date",
        "user_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.company_id)
            .push_bind(self.business_account_id)
            .push_bind(self.publish_date)
            .push_bind(self.location_id)
            .push_bind(self.job_page_id)
            .push_bind(self.hiring)
            .push_bind(self.job_active_date)
            .push_bind(self.job_paused_date)
            .push_bind(self.job_deleted_date)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreateHiring {
    const TABLE: &'static str = "hiring";
    const COLUMNS: &'static [&'static str] = &[
        "candidates",
        "active_candidates",
        "disqualified_candidates",
        "number_of_stages",
        "job_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.candidates)
            .push_bind(self.active_candidates)
            .push_bind(self.disqualified_candidates)
            .push_bind(self.number_of_stages)
            .push_bind(self.job_id);
    }
}

impl PgInsert for CreateOrganization {
    const TABLE: &'static str = "organizations";
    const COLUMNS: &'static [&'static str] = &[
        "organization_name",
        "organization_type",
        "create_date",
        "update_date",
        "user_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.organization_name)
            .push_bind(self.organization_type)
            .push_bind(self.create_date)
            .push_bind(self.update_date)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreatePage {
    const TABLE: &'static str = "pages";
    const COLUMNS: &'static [&'static str] = &[
        "page_name",
        "page_description",
        "create_date",
        "update_date",
        "views",
        "followers",
        "user_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.page_name)
            .push_bind(self.page_description)
            .push_bind(self.create_date)
            .push_bind(self.update_date)
            .push_bind(self.views)
            .push_bind(self.followers)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreatePost {
    const TABLE: &'static str = "posts";
    const COLUMNS: &'static [&'static str] = &[
        "post_type",
        "content",
        "create_date",
        "update_date",
        "views",
        "comments",
        "likes",
        "user_id",
    ];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.post_type)
            .push_bind(self.content)
            .push_bind(self.create_date)
            .push_bind(self.update_date)
            .push_bind(self.views)
            .push_bind(self.comments)
            .push_bind(self.likes)
            .push_bind(self.user_id);
    }
}

impl PgInsert for CreateInvitation {
    const TABLE: &'static str = "invitations";
    const COLUMNS: &'static [&'static str] = &["sent_date", "accepted_date", "status", "user_id"];

    fn push_binds(self, binds: &mut Separated<'_, 'static, Postgres, &'static str>) {
        binds
            .push_bind(self.sent_date)
            .push_bind(self.accepted_date)
            .push_bind(self.status)
            .push_bind(self.user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_insert_sql() {
        let input: CreateLocation = serde_json::from_value(json!({
            "continent": "North America",
            "country": "United States",
            "state": "California",
            "city": "San Francisco"
        }))
        .unwrap();

        let builder = insert_query(input);
        assert_eq!(
            builder.sql(),
            "INSERT INTO locations (continent, country, state, city) VALUES ($1, $2, $3, $4) RETURNING *"
        );
    }

    #[test]
    fn test_optional_columns_are_still_bound() {
        let input: CreateInvitation = serde_json::from_value(json!({
            "sentDate": "2024-07-20",
            "status": "pending",
            "userId": 9
        }))
        .unwrap();

        let builder = insert_query(input);
        assert_eq!(
            builder.sql(),
            "INSERT INTO invitations (sent_date, accepted_date, status, user_id) VALUES ($1, $2, $3, $4) RETURNING *"
        );
    }

    #[test]
    fn test_business_company_maps_type_column() {
        assert!(CreateBusinessCompany::COLUMNS.contains(&"type"));
        assert_eq!(CreateBusinessCompany::TABLE, "business_companies");
    }
}
