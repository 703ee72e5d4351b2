//! # CheckResultRepository
//!
//! 受診結果の永続化を担当する。結果は追記のみで、更新・削除は提供しない。

use async_trait::async_trait;
use chrono::NaiveDate;
use kenshin_domain::{
    check_request::CheckRequestId,
    check_result::{CheckResult, CheckResultId, NewCheckResult},
    employee::EmployeeId,
};
use sqlx::PgPool;

use crate::{db::TxContext, error::InfraError};

/// 受診結果リポジトリトレイト
#[async_trait]
pub trait CheckResultRepository: Send + Sync {
    /// 受診結果を挿入し、採番済みのエンティティを返す
    async fn insert(
        &self,
        tx: &mut TxContext,
        result: &NewCheckResult,
    ) -> Result<CheckResult, InfraError>;

    /// 従業員の受診結果を受診日の新しい順で取得する
    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CheckResult>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct CheckResultRow {
    id:                i64,
    employee_id:       i64,
    request_id:        Option<i64>,
    check_date:        NaiveDate,
    health_status:     String,
    doctor_conclusion: String,
}

impl From<CheckResultRow> for CheckResult {
    fn from(row: CheckResultRow) -> Self {
        CheckResult::from_db(
            CheckResultId::new(row.id),
            NewCheckResult {
                employee_id:       EmployeeId::new(row.employee_id),
                request_id:        row.request_id.map(CheckRequestId::new),
                check_date:        row.check_date,
                health_status:     row.health_status,
                doctor_conclusion: row.doctor_conclusion,
            },
        )
    }
}

/// PostgreSQL 実装の CheckResultRepository
#[derive(Debug, Clone)]
pub struct PostgresCheckResultRepository {
    pool: PgPool,
}

impl PostgresCheckResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckResultRepository for PostgresCheckResultRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(employee_id = %result.employee_id))]
    async fn insert(
        &self,
        tx: &mut TxContext,
        result: &NewCheckResult,
    ) -> Result<CheckResult, InfraError> {
        let row = sqlx::query_as::<_, CheckResultRow>(
            r#"
            INSERT INTO health_check_results
                (employee_id, request_id, check_date, health_status, doctor_conclusion)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, employee_id, request_id, check_date, health_status, doctor_conclusion
            "#,
        )
        .bind(result.employee_id.as_i64())
        .bind(result.request_id.map(CheckRequestId::as_i64))
        .bind(result.check_date)
        .bind(&result.health_status)
        .bind(&result.doctor_conclusion)
        .fetch_one(tx.conn())
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%employee_id))]
    async fn find_by_employee(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Vec<CheckResult>, InfraError> {
        let rows = sqlx::query_as::<_, CheckResultRow>(
            r#"
            SELECT id, employee_id, request_id, check_date, health_status, doctor_conclusion
            FROM health_check_results
            WHERE employee_id = $1
            ORDER BY check_date DESC, id DESC
            "#,
        )
        .bind(employee_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CheckResult::from).collect())
    }
}
