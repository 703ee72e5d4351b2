//! # 従業員ハンドラ
//!
//! - `GET /due-employees` - 受診対象者一覧
//! - `GET /employees/{id}/results` - 従業員の受診結果一覧

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use kenshin_domain::employee::{Employee, EmployeeId};
use serde::{Deserialize, Serialize};

use super::{HealthCheckState, result::CheckResultDto};
use crate::error::CoreError;

/// 従業員 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id:                     i64,
    pub first_name:             String,
    pub last_name:              String,
    pub email:                  Option<String>,
    pub department:             Option<String>,
    pub last_health_check_date: Option<NaiveDate>,
}

impl From<&Employee> for EmployeeDto {
    fn from(employee: &Employee) -> Self {
        let profile = employee.profile();
        Self {
            id:                     employee.id().as_i64(),
            first_name:             profile.first_name.clone(),
            last_name:              profile.last_name.clone(),
            email:                  profile.email.clone(),
            department:             profile.department.clone(),
            last_health_check_date: employee.last_health_check_date(),
        }
    }
}

/// GET /due-employees
#[tracing::instrument(skip_all)]
pub async fn list_due_employees(
    State(state): State<Arc<HealthCheckState>>,
) -> Result<Json<Vec<EmployeeDto>>, CoreError> {
    let employees = state.usecase.list_due_employees().await?;
    Ok(Json(employees.iter().map(EmployeeDto::from).collect()))
}

/// GET /employees/{id}/results
#[tracing::instrument(skip_all, fields(%id))]
pub async fn list_employee_results(
    State(state): State<Arc<HealthCheckState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CheckResultDto>>, CoreError> {
    let results = state
        .usecase
        .list_employee_results(EmployeeId::new(id))
        .await?;
    Ok(Json(results.iter().map(CheckResultDto::from).collect()))
}
