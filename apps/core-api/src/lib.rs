//! # Kenshin Core API
//!
//! 健康診断キャンペーン管理の HTTP サーバー。
//!
//! ## レイヤー構成
//!
//! - [`handler`]: HTTP リクエスト/レスポンスの変換（DTO）
//! - [`usecase`]: 業務フロー（存在確認、状態遷移、トランザクション境界）
//! - [`error`]: [`CoreError`](error::CoreError) と Problem Details への変換
//! - [`app_builder`]: ルーターとミドルウェアの組み立て
//! - [`config`]: 環境変数からの設定読み込み

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
