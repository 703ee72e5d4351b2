//! ユースケース層の共通ヘルパー

use kenshin_domain::DomainError;
use kenshin_infra::InfraError;

use crate::error::CoreError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// ```ignore
/// let campaign = self.campaign_repo.find_by_id(id).await
///     .or_not_found("Campaign", id)?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `CoreError::NotFound`、`InfraError` の場合は `CoreError::Database` を返す
    fn or_not_found(self, entity_type: &'static str, id: impl ToString) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_type: &'static str, id: impl ToString) -> Result<T, CoreError> {
        self?
            .ok_or_else(|| DomainError::not_found(entity_type, id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_not_found_ok_some_は値を返す() {
        let result: Result<Option<i32>, InfraError> = Ok(Some(42));

        assert_eq!(result.or_not_found("Campaign", 1).unwrap(), 42);
    }

    #[test]
    fn test_or_not_found_ok_none_はnot_foundエラーを返す() {
        let result: Result<Option<i32>, InfraError> = Ok(None);

        let err = result.or_not_found("Employee", 7).unwrap_err();

        match err {
            CoreError::NotFound(msg) => assert_eq!(msg, "Employee が見つかりません: 7"),
            other => panic!("NotFound を期待したが {:?} を受信", other),
        }
    }

    #[test]
    fn test_or_not_found_errはdatabaseエラーを返す() {
        let result: Result<Option<i32>, InfraError> = Err(InfraError::unexpected("接続失敗"));

        let err = result.or_not_found("Campaign", 1).unwrap_err();

        assert!(matches!(err, CoreError::Database(_)));
    }
}
