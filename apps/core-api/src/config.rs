//! # Core API 設定
//!
//! 環境変数から Core API サーバーの設定を読み込む。
//!
//! | 変数 | 必須 | デフォルト |
//! |------|------|-----------|
//! | `KENSHIN_HOST` | - | `0.0.0.0` |
//! | `KENSHIN_PORT` | - | `8080` |
//! | `DATABASE_URL` | ○ | - |
//! | `DATABASE_MAX_CONNECTIONS` | - | `10` |
//! | `RUN_MIGRATIONS` | - | `true` |

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Core API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// バインドアドレス
    pub host:                     String,
    /// ポート番号
    pub port:                     u16,
    /// データベース接続 URL
    pub database_url:             String,
    /// 接続プールの最大接続数
    pub database_max_connections: u32,
    /// 起動時にマイグレーションを適用するか
    pub run_migrations:           bool,
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を組み立てる
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:                     lookup("KENSHIN_HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port:                     parse_or("KENSHIN_PORT", lookup("KENSHIN_PORT"), 8080)?,
            database_url:             lookup("DATABASE_URL")
                .ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                10,
            )?,
            run_migrations:           parse_or("RUN_MIGRATIONS", lookup("RUN_MIGRATIONS"), true)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
