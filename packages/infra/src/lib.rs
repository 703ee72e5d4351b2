//! # Kenshin Infra
//!
//! 健康診断管理の永続化層。PostgreSQL への接続管理、トランザクション、
//! 各エンティティのリポジトリ実装を提供する。
//!
//! ## モジュール構成
//!
//! - [`db`]: 接続プール・マイグレーション・[`TxContext`](db::TxContext)
//! - [`error`]: インフラ層エラー（SpanTrace 付き）
//! - [`repository`]: リポジトリ trait と PostgreSQL 実装
//! - `mock`: インメモリ実装（`test-utils` feature 有効時のみ）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::InfraError;
