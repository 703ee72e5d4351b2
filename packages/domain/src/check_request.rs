//! # 受診依頼
//!
//! キャンペーンに登録された 1 従業員分の受診依頼。
//!
//! ## 状態遷移
//!
//! ```text
//! PENDING ──(キャンペーン単位の HIS 連携)──▶ SENT_TO_HIS
//! ```
//!
//! `COMPLETED` / `SKIPPED` は定義のみで、遷移させる操作は存在しない。
//! 同一（キャンペーン, 従業員）の重複登録は制約で防いでいない。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{campaign::CampaignId, employee::EmployeeId};

define_serial_id! {
    /// 受診依頼 ID
    pub struct CheckRequestId;
}

/// 受診依頼ステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckRequestStatus {
    /// 登録済み・未送信
    Pending,
    /// HIS へ送信済み
    SentToHis,
    /// 受診完了
    Completed,
    /// 受診見送り
    Skipped,
}

/// 採番前の受診依頼
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckRequest {
    campaign_id: CampaignId,
    employee_id: EmployeeId,
    status:      CheckRequestStatus,
}

impl NewCheckRequest {
    /// `PENDING` の受診依頼を作成する
    pub fn pending(campaign_id: CampaignId, employee_id: EmployeeId) -> Self {
        Self {
            campaign_id,
            employee_id,
            status: CheckRequestStatus::Pending,
        }
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn status(&self) -> CheckRequestStatus {
        self.status
    }
}

/// 受診依頼エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    id:                 CheckRequestId,
    campaign_id:        CampaignId,
    employee_id:        EmployeeId,
    status:             CheckRequestStatus,
    /// HIS 側の予約 ID（連携が実装されるまで常に `None`）
    his_appointment_id: Option<String>,
}

impl CheckRequest {
    pub fn from_db(
        id: CheckRequestId,
        campaign_id: CampaignId,
        employee_id: EmployeeId,
        status: CheckRequestStatus,
        his_appointment_id: Option<String>,
    ) -> Self {
        Self {
            id,
            campaign_id,
            employee_id,
            status,
            his_appointment_id,
        }
    }

    pub fn id(&self) -> CheckRequestId {
        self.id
    }

    pub fn campaign_id(&self) -> CampaignId {
        self.campaign_id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn status(&self) -> CheckRequestStatus {
        self.status
    }

    pub fn his_appointment_id(&self) -> Option<&str> {
        self.his_appointment_id.as_deref()
    }

    /// HIS 送信済みにした依頼を返す
    ///
    /// `PENDING` 以外はそのまま据え置くため `None` を返す（エラーにはしない）。
    pub fn sent_to_his(&self) -> Option<Self> {
        (self.status == CheckRequestStatus::Pending).then(|| Self {
            status: CheckRequestStatus::SentToHis,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    fn request(status: CheckRequestStatus) -> CheckRequest {
        CheckRequest::from_db(
            CheckRequestId::new(10),
            CampaignId::new(1),
            EmployeeId::new(7),
            status,
            None,
        )
    }

    #[test]
    fn test_pendingで作成される() {
        let new_request = NewCheckRequest::pending(CampaignId::new(1), EmployeeId::new(7));

        assert_eq!(new_request.status(), CheckRequestStatus::Pending);
        assert_eq!(new_request.campaign_id(), CampaignId::new(1));
        assert_eq!(new_request.employee_id(), EmployeeId::new(7));
    }

    #[test]
    fn test_sent_to_his_pendingはsent_to_hisになる() {
        let sent = request(CheckRequestStatus::Pending).sent_to_his().unwrap();

        assert_eq!(sent.status(), CheckRequestStatus::SentToHis);
        assert_eq!(sent.id(), CheckRequestId::new(10));
    }

    #[rstest]
    #[case(CheckRequestStatus::SentToHis)]
    #[case(CheckRequestStatus::Completed)]
    #[case(CheckRequestStatus::Skipped)]
    fn test_sent_to_his_pending以外は据え置き(#[case] status: CheckRequestStatus) {
        assert_eq!(request(status).sent_to_his(), None);
    }

    #[test]
    fn test_sent_to_hisの文字列表現() {
        assert_eq!(CheckRequestStatus::SentToHis.to_string(), "SENT_TO_HIS");
        assert_eq!(
            CheckRequestStatus::from_str("SENT_TO_HIS").unwrap(),
            CheckRequestStatus::SentToHis
        );
    }
}
