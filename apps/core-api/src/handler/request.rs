//! # 受診依頼ハンドラ
//!
//! - `GET /requests?status=PENDING` - ステータス別の受診依頼一覧

use std::{str::FromStr, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
};
use kenshin_domain::check_request::{CheckRequest, CheckRequestStatus};
use serde::{Deserialize, Serialize};

use super::HealthCheckState;
use crate::error::CoreError;

/// 受診依頼 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequestDto {
    pub id:                 i64,
    pub campaign_id:        i64,
    pub employee_id:        i64,
    pub status:             CheckRequestStatus,
    pub his_appointment_id: Option<String>,
}

impl From<&CheckRequest> for CheckRequestDto {
    fn from(request: &CheckRequest) -> Self {
        Self {
            id:                 request.id().as_i64(),
            campaign_id:        request.campaign_id().as_i64(),
            employee_id:        request.employee_id().as_i64(),
            status:             request.status(),
            his_appointment_id: request.his_appointment_id().map(str::to_string),
        }
    }
}

/// ステータス絞り込みクエリ
#[derive(Debug, Deserialize)]
pub struct RequestStatusQuery {
    pub status: String,
}

/// GET /requests?status={status}
#[tracing::instrument(skip_all, fields(status = %query.status))]
pub async fn list_requests_by_status(
    State(state): State<Arc<HealthCheckState>>,
    Query(query): Query<RequestStatusQuery>,
) -> Result<Json<Vec<CheckRequestDto>>, CoreError> {
    let status = CheckRequestStatus::from_str(&query.status)
        .map_err(|_| CoreError::BadRequest(format!("不明なステータス: {}", query.status)))?;

    let requests = state.usecase.list_requests_by_status(status).await?;
    Ok(Json(requests.iter().map(CheckRequestDto::from).collect()))
}
