//! # キャンペーンハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /campaigns` - キャンペーン作成（常に `PLANNING`）
//! - `GET /campaigns` - キャンペーン一覧
//! - `GET /campaigns/{id}` - キャンペーン詳細
//! - `POST /campaigns/{id}/add-employees` - 従業員登録
//! - `POST /campaigns/{id}/sync-to-his` - HIS 連携済みにする
//! - `GET /campaigns/{id}/requests` - キャンペーンの受診依頼一覧

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::NaiveDate;
use kenshin_domain::{
    campaign::{Campaign, CampaignDetails, CampaignId, CampaignStatus},
    employee::EmployeeId,
};
use serde::{Deserialize, Serialize};

use super::{HealthCheckState, request::CheckRequestDto};
use crate::error::CoreError;

/// 従業員登録の完了メッセージ
pub const ENROLLED_MESSAGE: &str = "Employees added to campaign successfully";

/// HIS 連携の完了メッセージ
pub const SYNCED_MESSAGE: &str = "Campaign synced to HIS (Requests marked as SENT_TO_HIS)";

// --- リクエスト/レスポンス型 ---

/// キャンペーン作成リクエスト
///
/// `status` を含めても無視される（作成時は常に `PLANNING`）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name:        String,
    pub start_date:  Option<NaiveDate>,
    pub end_date:    Option<NaiveDate>,
    pub description: Option<String>,
}

impl From<CreateCampaignRequest> for CampaignDetails {
    fn from(req: CreateCampaignRequest) -> Self {
        Self {
            name:        req.name,
            start_date:  req.start_date,
            end_date:    req.end_date,
            description: req.description,
        }
    }
}

/// キャンペーン DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDto {
    pub id:          i64,
    pub name:        String,
    pub start_date:  Option<NaiveDate>,
    pub end_date:    Option<NaiveDate>,
    pub description: Option<String>,
    pub status:      CampaignStatus,
}

impl From<&Campaign> for CampaignDto {
    fn from(campaign: &Campaign) -> Self {
        let details = campaign.details();
        Self {
            id:          campaign.id().as_i64(),
            name:        details.name.clone(),
            start_date:  details.start_date,
            end_date:    details.end_date,
            description: details.description.clone(),
            status:      campaign.status(),
        }
    }
}

// --- ハンドラ ---

/// POST /campaigns
///
/// `name` の欠落や JSON の構文エラーは problem details 形式の 400 で返す。
#[tracing::instrument(skip_all)]
pub async fn create_campaign(
    State(state): State<Arc<HealthCheckState>>,
    payload: Result<Json<CreateCampaignRequest>, JsonRejection>,
) -> Result<Json<CampaignDto>, CoreError> {
    let Json(req) = payload.map_err(|e| CoreError::BadRequest(e.body_text()))?;
    let campaign = state.usecase.create_campaign(req.into()).await?;
    Ok(Json(CampaignDto::from(&campaign)))
}

/// GET /campaigns
#[tracing::instrument(skip_all)]
pub async fn list_campaigns(
    State(state): State<Arc<HealthCheckState>>,
) -> Result<Json<Vec<CampaignDto>>, CoreError> {
    let campaigns = state.usecase.list_campaigns().await?;
    Ok(Json(campaigns.iter().map(CampaignDto::from).collect()))
}

/// GET /campaigns/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_campaign(
    State(state): State<Arc<HealthCheckState>>,
    Path(id): Path<i64>,
) -> Result<Json<CampaignDto>, CoreError> {
    let campaign = state.usecase.get_campaign(CampaignId::new(id)).await?;
    Ok(Json(CampaignDto::from(&campaign)))
}

/// POST /campaigns/{id}/add-employees
///
/// ボディは従業員 ID の配列（例: `[1, 2, 3]`）。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn enroll_employees(
    State(state): State<Arc<HealthCheckState>>,
    Path(id): Path<i64>,
    Json(employee_ids): Json<Vec<i64>>,
) -> Result<&'static str, CoreError> {
    let employee_ids: Vec<EmployeeId> = employee_ids.into_iter().map(EmployeeId::new).collect();
    state
        .usecase
        .enroll_employees(CampaignId::new(id), &employee_ids)
        .await?;
    Ok(ENROLLED_MESSAGE)
}

/// POST /campaigns/{id}/sync-to-his
#[tracing::instrument(skip_all, fields(%id))]
pub async fn mark_campaign_sent(
    State(state): State<Arc<HealthCheckState>>,
    Path(id): Path<i64>,
) -> Result<&'static str, CoreError> {
    state.usecase.mark_campaign_sent(CampaignId::new(id)).await?;
    Ok(SYNCED_MESSAGE)
}

/// GET /campaigns/{id}/requests
#[tracing::instrument(skip_all, fields(%id))]
pub async fn list_campaign_requests(
    State(state): State<Arc<HealthCheckState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CheckRequestDto>>, CoreError> {
    let requests = state
        .usecase
        .list_campaign_requests(CampaignId::new(id))
        .await?;
    Ok(Json(requests.iter().map(CheckRequestDto::from).collect()))
}
