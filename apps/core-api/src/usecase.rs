//! # ユースケース層
//!
//! ハンドラから呼ばれる業務フロー。リポジトリ trait とトランザクション管理を
//! コンストラクタで受け取り、グローバルな状態は持たない。

pub(crate) mod helpers;

pub mod health_check;

pub use health_check::{HealthCheckUseCaseImpl, RecordResultInput};
