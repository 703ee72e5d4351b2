//! # ドメイン層エラー定義
//!
//! ドメイン固有の例外状態を表現するエラー型。
//! 現状は参照先の欠落（`NotFound`、HTTP では 404）のみ。
//!
//! ```rust
//! use kenshin_domain::DomainError;
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Campaign",
//!     id:          "42".to_string(),
//! };
//! assert_eq!(error.to_string(), "Campaign が見つかりません: 42");
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// エンティティが見つからない
    ///
    /// メッセージには欠けている ID のみを含める。
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Campaign", "Employee" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}

impl DomainError {
    /// `NotFound` を生成する
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }
}
