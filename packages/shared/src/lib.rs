//! # Kenshin 共有ユーティリティ
//!
//! 健康診断キャンペーン管理の全クレートから使用される共通ユーティリティ。
//!
//! ## 設計方針
//!
//! - domain / infra / core-api のすべてから依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（HTTP 変換は各アプリの責務）

pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
