//! # EmployeeRepository
//!
//! 従業員の参照と最終受診日の更新を担当する。
//! 従業員の登録・削除は人事システム側の責務のため提供しない。

use async_trait::async_trait;
use chrono::NaiveDate;
use kenshin_domain::employee::{Employee, EmployeeId, EmployeeProfile};
use sqlx::PgPool;

use crate::{db::TxContext, error::InfraError};

/// 従業員リポジトリトレイト
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 全従業員を ID 順で取得する
    async fn find_all(&self) -> Result<Vec<Employee>, InfraError>;

    /// ID で従業員を検索する
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError>;

    /// 最終受診日を更新する
    ///
    /// 保存済みの日付より新しい場合（または未受診の場合）のみ書き込む。
    /// 並行して古い受診日が取り込まれても最終受診日は後退しない。
    async fn update_last_health_check_date(
        &self,
        tx: &mut TxContext,
        employee: &Employee,
    ) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id:                     i64,
    first_name:             String,
    last_name:              String,
    email:                  Option<String>,
    department:             Option<String>,
    last_health_check_date: Option<NaiveDate>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee::from_db(
            EmployeeId::new(row.id),
            EmployeeProfile {
                first_name: row.first_name,
                last_name:  row.last_name,
                email:      row.email,
                department: row.department,
            },
            row.last_health_check_date,
        )
    }
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Employee>, InfraError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, first_name, last_name, email, department, last_health_check_date
            FROM employees
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, first_name, last_name, email, department, last_health_check_date
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Employee::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %employee.id()))]
    async fn update_last_health_check_date(
        &self,
        tx: &mut TxContext,
        employee: &Employee,
    ) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE employees
            SET last_health_check_date = $2
            WHERE id = $1
              AND (last_health_check_date IS NULL OR last_health_check_date < $2)
            "#,
        )
        .bind(employee.id().as_i64())
        .bind(employee.last_health_check_date())
        .execute(tx.conn())
        .await?;

        Ok(())
    }
}
