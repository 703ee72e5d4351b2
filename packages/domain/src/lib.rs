//! # Kenshin ドメイン層
//!
//! 健康診断キャンペーン管理のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 採番済み ID を持つ `Campaign`, `CheckRequest`, `CheckResult`, `Employee`
//! - **未保存エンティティ**: ID 採番前の `NewCampaign` などは別の型で表し、
//!   採番はリポジトリ（DB）に任せる
//! - **状態遷移**: ステータス変更は不変更新メソッドで表現する
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-api → infra → domain
//!     ↘
//!       shared
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`campaign`] - 健康診断キャンペーン
//! - [`check_request`] - キャンペーンへの従業員登録（受診依頼）
//! - [`check_result`] - 受診結果
//! - [`employee`] - 従業員（人事システム側のエンティティ）
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー

#[macro_use]
mod macros;

pub mod campaign;
pub mod check_request;
pub mod check_result;
pub mod clock;
pub mod employee;
pub mod error;

pub use error::DomainError;
