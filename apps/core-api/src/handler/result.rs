//! # 受診結果ハンドラ
//!
//! - `POST /results` - 病院側からの受診結果取り込み
//!
//! ペイロードの欠落・型不一致、従業員の不在などの失敗はすべて
//! 400（`malformed-input`）として `detail` に理由を載せて返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::NaiveDate;
use kenshin_domain::{check_result::CheckResult, employee::EmployeeId};
use serde::{Deserialize, Serialize};

use super::HealthCheckState;
use crate::{error::CoreError, usecase::RecordResultInput};

/// 受診結果 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResultDto {
    pub id:                i64,
    pub employee_id:       i64,
    pub request_id:        Option<i64>,
    pub check_date:        NaiveDate,
    pub health_status:     String,
    pub doctor_conclusion: String,
}

impl From<&CheckResult> for CheckResultDto {
    fn from(result: &CheckResult) -> Self {
        Self {
            id:                result.id().as_i64(),
            employee_id:       result.employee_id().as_i64(),
            request_id:        result.request_id().map(|id| id.as_i64()),
            check_date:        result.check_date(),
            health_status:     result.health_status().to_string(),
            doctor_conclusion: result.doctor_conclusion().to_string(),
        }
    }
}

/// `employeeId` は数値でも数字文字列でも受け付ける
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmployeeIdValue {
    Number(i64),
    Text(String),
}

/// 受診結果ペイロード（検証前）
///
/// 欠落を検証エラーとして報告するため、全フィールドを `Option` で受ける。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub employee_id:       Option<EmployeeIdValue>,
    pub check_date:        Option<String>,
    pub health_status:     Option<String>,
    pub doctor_conclusion: Option<String>,
}

impl TryFrom<ResultPayload> for RecordResultInput {
    type Error = CoreError;

    fn try_from(payload: ResultPayload) -> Result<Self, Self::Error> {
        let employee_id = match payload.employee_id.ok_or_else(|| missing("employeeId"))? {
            EmployeeIdValue::Number(id) => id,
            EmployeeIdValue::Text(text) => text.trim().parse().map_err(|_| {
                CoreError::MalformedInput(format!("employeeId が整数ではありません: {text}"))
            })?,
        };
        let check_date_text = payload.check_date.ok_or_else(|| missing("checkDate"))?;
        let check_date = check_date_text.parse::<NaiveDate>().map_err(|_| {
            CoreError::MalformedInput(format!(
                "checkDate は YYYY-MM-DD 形式で指定してください: {check_date_text}"
            ))
        })?;

        Ok(Self {
            employee_id: EmployeeId::new(employee_id),
            check_date,
            health_status: payload.health_status.ok_or_else(|| missing("healthStatus"))?,
            doctor_conclusion: payload
                .doctor_conclusion
                .ok_or_else(|| missing("doctorConclusion"))?,
        })
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::MalformedInput(format!("{field} は必須です"))
}

/// POST /results
#[tracing::instrument(skip_all)]
pub async fn record_result(
    State(state): State<Arc<HealthCheckState>>,
    payload: Result<Json<ResultPayload>, JsonRejection>,
) -> Result<Json<CheckResultDto>, CoreError> {
    let Json(payload) = payload.map_err(|e| CoreError::MalformedInput(e.body_text()))?;
    let input = RecordResultInput::try_from(payload)?;

    let result = state.usecase.record_result(input).await.map_err(|e| {
        tracing::warn!(error = %e, "受診結果の取り込みに失敗");
        match e {
            CoreError::MalformedInput(_) => e,
            other => CoreError::MalformedInput(other.to_string()),
        }
    })?;

    Ok(Json(CheckResultDto::from(&result)))
}
