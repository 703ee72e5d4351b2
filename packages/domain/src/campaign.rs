//! # 健康診断キャンペーン
//!
//! 期間を区切った健康診断の実施単位。従業員の受診依頼（[`CheckRequest`](crate::check_request::CheckRequest)）を束ねる。
//!
//! ## 状態遷移
//!
//! ```text
//! PLANNING ──(HIS 連携)──▶ SCHEDULED ──▶ IN_PROGRESS ──▶ COMPLETED
//! ```
//!
//! - 作成時は入力に関わらず必ず `PLANNING`
//! - `SCHEDULED` への遷移は HIS 連携（受診依頼の送信済みマーク）で行う
//! - `IN_PROGRESS` / `COMPLETED` へ進める操作は現時点で存在しない

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

define_serial_id! {
    /// キャンペーン ID
    pub struct CampaignId;
}

/// キャンペーンステータス
///
/// DB と JSON のどちらでも `PLANNING` のような大文字スネークケースで表現する。
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
pub enum CampaignStatus {
    /// 計画中
    Planning,
    /// 日程確定（HIS へ依頼送信済み）
    Scheduled,
    /// 実施中
    InProgress,
    /// 完了
    Completed,
}

/// キャンペーンの属性（名称・期間・説明）
///
/// 開始日と終了日の前後関係は検証しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDetails {
    pub name:        String,
    pub start_date:  Option<NaiveDate>,
    pub end_date:    Option<NaiveDate>,
    pub description: Option<String>,
}

/// 採番前のキャンペーン
///
/// ステータスは常に [`CampaignStatus::Planning`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    details: CampaignDetails,
    status:  CampaignStatus,
}

impl NewCampaign {
    pub fn new(details: CampaignDetails) -> Self {
        Self {
            details,
            status: CampaignStatus::Planning,
        }
    }

    pub fn details(&self) -> &CampaignDetails {
        &self.details
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }
}

/// キャンペーンエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    id:      CampaignId,
    details: CampaignDetails,
    status:  CampaignStatus,
}

impl Campaign {
    /// 既存のデータからキャンペーンを復元する（挿入直後の RETURNING も含む）
    pub fn from_db(id: CampaignId, details: CampaignDetails, status: CampaignStatus) -> Self {
        Self {
            id,
            details,
            status,
        }
    }

    pub fn id(&self) -> CampaignId {
        self.id
    }

    pub fn details(&self) -> &CampaignDetails {
        &self.details
    }

    pub fn name(&self) -> &str {
        &self.details.name
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    /// HIS 連携後の状態（`SCHEDULED`）を返す
    ///
    /// 依頼件数や現在のステータスに関わらず `SCHEDULED` にする。
    pub fn scheduled(self) -> Self {
        Self {
            status: CampaignStatus::Scheduled,
            ..self
        }
    }
}
