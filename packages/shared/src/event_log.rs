//! # ビジネスイベントログ
//!
//! [`log_business_event!`] でキャンペーンや結果取り込みの操作を構造化ログとして残す。
//! `event.kind = "business_event"` が自動付与されるため、
//! `jq 'select(.["event.kind"] == "business_event")'` で抽出できる。
//!
//! フィールドはドット記法（`event.category`, `event.action`）で命名する。

/// ビジネスイベントを `tracing::info!` レベルで出力する
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: [`event::category`] の定数
/// - `event.action`: [`event::action`] の定数
/// - `event.result`: [`event::result`] の定数
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: [`event::entity_type`] の定数
/// - `event.entity_id`: エンティティ ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    pub mod category {
        pub const HEALTH_CHECK: &str = "health_check";
    }

    pub mod action {
        pub const CAMPAIGN_CREATED: &str = "campaign.created";
        pub const EMPLOYEES_ENROLLED: &str = "campaign.employees_enrolled";
        pub const CAMPAIGN_SYNCED_TO_HIS: &str = "campaign.synced_to_his";
        pub const RESULT_RECORDED: &str = "result.recorded";
    }

    pub mod entity_type {
        pub const CAMPAIGN: &str = "campaign";
        pub const CHECK_RESULT: &str = "check_result";
    }

    pub mod result {
        pub const SUCCESS: &str = "success";
    }
}

/// エラーコンテキストフィールドの定数
///
/// `tracing::error!(error.category = ..., error.kind = ..., ...)` の形で使う。
pub mod error {
    pub mod category {
        pub const INFRASTRUCTURE: &str = "infrastructure";
    }

    pub mod kind {
        pub const DATABASE: &str = "database";
    }
}
