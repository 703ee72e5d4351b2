//! # CheckRequestRepository
//!
//! 受診依頼の永続化を担当する。

use std::str::FromStr;

use async_trait::async_trait;
use kenshin_domain::{
    campaign::CampaignId,
    check_request::{CheckRequest, CheckRequestId, CheckRequestStatus, NewCheckRequest},
    employee::EmployeeId,
};
use sqlx::PgPool;

use crate::{db::TxContext, error::InfraError};

/// 受診依頼リポジトリトレイト
#[async_trait]
pub trait CheckRequestRepository: Send + Sync {
    /// 受診依頼を挿入し、採番済みのエンティティを返す
    async fn insert(
        &self,
        tx: &mut TxContext,
        request: &NewCheckRequest,
    ) -> Result<CheckRequest, InfraError>;

    /// キャンペーンに属する受診依頼を ID 順で取得する
    async fn find_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CheckRequest>, InfraError>;

    /// 指定ステータスの受診依頼を ID 順で取得する
    async fn find_by_status(
        &self,
        status: CheckRequestStatus,
    ) -> Result<Vec<CheckRequest>, InfraError>;

    /// ステータスを更新する
    async fn update_status(
        &self,
        tx: &mut TxContext,
        request: &CheckRequest,
    ) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct CheckRequestRow {
    id:                 i64,
    campaign_id:        i64,
    employee_id:        i64,
    status:             String,
    his_appointment_id: Option<String>,
}

impl TryFrom<CheckRequestRow> for CheckRequest {
    type Error = InfraError;

    fn try_from(row: CheckRequestRow) -> Result<Self, Self::Error> {
        let status = CheckRequestStatus::from_str(&row.status).map_err(|_| {
            InfraError::unexpected(format!("不明な受診依頼ステータス: {}", row.status))
        })?;

        Ok(CheckRequest::from_db(
            CheckRequestId::new(row.id),
            CampaignId::new(row.campaign_id),
            EmployeeId::new(row.employee_id),
            status,
            row.his_appointment_id,
        ))
    }
}

/// PostgreSQL 実装の CheckRequestRepository
#[derive(Debug, Clone)]
pub struct PostgresCheckRequestRepository {
    pool: PgPool,
}

impl PostgresCheckRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CheckRequestRepository for PostgresCheckRequestRepository {
    #[tracing::instrument(
        skip_all,
        level = "debug",
        fields(campaign_id = %request.campaign_id(), employee_id = %request.employee_id())
    )]
    async fn insert(
        &self,
        tx: &mut TxContext,
        request: &NewCheckRequest,
    ) -> Result<CheckRequest, InfraError> {
        let status: &'static str = request.status().into();

        let row = sqlx::query_as::<_, CheckRequestRow>(
            r#"
            INSERT INTO health_check_requests (campaign_id, employee_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, campaign_id, employee_id, status, his_appointment_id
            "#,
        )
        .bind(request.campaign_id().as_i64())
        .bind(request.employee_id().as_i64())
        .bind(status)
        .fetch_one(tx.conn())
        .await?;

        row.try_into()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%campaign_id))]
    async fn find_by_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<CheckRequest>, InfraError> {
        let rows = sqlx::query_as::<_, CheckRequestRow>(
            r#"
            SELECT id, campaign_id, employee_id, status, his_appointment_id
            FROM health_check_requests
            WHERE campaign_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(campaign_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CheckRequest::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%status))]
    async fn find_by_status(
        &self,
        status: CheckRequestStatus,
    ) -> Result<Vec<CheckRequest>, InfraError> {
        let status: &'static str = status.into();

        let rows = sqlx::query_as::<_, CheckRequestRow>(
            r#"
            SELECT id, campaign_id, employee_id, status, his_appointment_id
            FROM health_check_requests
            WHERE status = $1
            ORDER BY id ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CheckRequest::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %request.id()))]
    async fn update_status(
        &self,
        tx: &mut TxContext,
        request: &CheckRequest,
    ) -> Result<(), InfraError> {
        let status: &'static str = request.status().into();

        sqlx::query(
            r#"
            UPDATE health_check_requests
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(request.id().as_i64())
        .bind(status)
        .execute(tx.conn())
        .await?;

        Ok(())
    }
}
