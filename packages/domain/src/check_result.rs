//! # 受診結果
//!
//! 病院側から取り込んだ 1 回分の受診結果。作成後は更新・削除しない。

use chrono::NaiveDate;

use crate::{check_request::CheckRequestId, employee::EmployeeId};

define_serial_id! {
    /// 受診結果 ID
    pub struct CheckResultId;
}

/// 採番前の受診結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckResult {
    pub employee_id:       EmployeeId,
    /// 元になった受診依頼（取り込み経路では設定しない）
    pub request_id:        Option<CheckRequestId>,
    pub check_date:        NaiveDate,
    /// 判定区分（例: "Type 1"〜"Type 4"）
    pub health_status:     String,
    pub doctor_conclusion: String,
}

impl NewCheckResult {
    /// 受診依頼に紐づかない結果を作成する
    pub fn unlinked(
        employee_id: EmployeeId,
        check_date: NaiveDate,
        health_status: String,
        doctor_conclusion: String,
    ) -> Self {
        Self {
            employee_id,
            request_id: None,
            check_date,
            health_status,
            doctor_conclusion,
        }
    }
}

/// 受診結果エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    id:     CheckResultId,
    record: NewCheckResult,
}

impl CheckResult {
    pub fn from_db(id: CheckResultId, record: NewCheckResult) -> Self {
        Self { id, record }
    }

    pub fn id(&self) -> CheckResultId {
        self.id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.record.employee_id
    }

    pub fn request_id(&self) -> Option<CheckRequestId> {
        self.record.request_id
    }

    pub fn check_date(&self) -> NaiveDate {
        self.record.check_date
    }

    pub fn health_status(&self) -> &str {
        &self.record.health_status
    }

    pub fn doctor_conclusion(&self) -> &str {
        &self.record.doctor_conclusion
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_unlinkedは受診依頼に紐づかない() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 6).unwrap();
        let record = NewCheckResult::unlinked(
            EmployeeId::new(3),
            date,
            "Type 1".to_string(),
            "Good".to_string(),
        );

        let result = CheckResult::from_db(CheckResultId::new(1), record);

        assert_eq!(result.request_id(), None);
        assert_eq!(result.employee_id(), EmployeeId::new(3));
        assert_eq!(result.check_date(), date);
        assert_eq!(result.health_status(), "Type 1");
        assert_eq!(result.doctor_conclusion(), "Good");
    }
}
