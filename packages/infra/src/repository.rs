//! # リポジトリ
//!
//! 健康診断管理の各エンティティの永続化を担当する。
//!
//! - 読み取りメソッドはプールから直接クエリする
//! - 書き込みメソッドは [`TxContext`](crate::db::TxContext) を要求する
//! - ステータスは DB 上で文字列（`PLANNING` 等）として保存する

pub mod campaign_repository;
pub mod check_request_repository;
pub mod check_result_repository;
pub mod employee_repository;

pub use campaign_repository::{CampaignRepository, PostgresCampaignRepository};
pub use check_request_repository::{CheckRequestRepository, PostgresCheckRequestRepository};
pub use check_result_repository::{CheckResultRepository, PostgresCheckResultRepository};
pub use employee_repository::{EmployeeRepository, PostgresEmployeeRepository};
