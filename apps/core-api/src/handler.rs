//! # ハンドラ
//!
//! HTTP リクエストを受け取り、ユースケースを呼び出して JSON を返す。
//! 業務 API はすべて `/api/hrm/health-check` 配下、ヘルスチェックのみルート直下。
//!
//! JSON のフィールド名は camelCase、日付は `YYYY-MM-DD`。

pub mod campaign;
pub mod employee;
pub mod health;
pub mod request;
pub mod result;

pub use campaign::{
    create_campaign,
    enroll_employees,
    get_campaign,
    list_campaign_requests,
    list_campaigns,
    mark_campaign_sent,
};
pub use employee::{list_due_employees, list_employee_results};
pub use health::{ReadinessState, health_check, readiness_check};
pub use request::list_requests_by_status;
pub use result::record_result;

use crate::usecase::HealthCheckUseCaseImpl;

/// 健康診断 API の共有状態
pub struct HealthCheckState {
    pub usecase: HealthCheckUseCaseImpl,
}
