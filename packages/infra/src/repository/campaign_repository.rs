//! # CampaignRepository
//!
//! 健康診断キャンペーンの永続化を担当する。

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use kenshin_domain::campaign::{
    Campaign,
    CampaignDetails,
    CampaignId,
    CampaignStatus,
    NewCampaign,
};
use sqlx::PgPool;

use crate::{db::TxContext, error::InfraError};

/// キャンペーンリポジトリトレイト
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// キャンペーンを挿入し、採番済みのエンティティを返す
    async fn insert(
        &self,
        tx: &mut TxContext,
        campaign: &NewCampaign,
    ) -> Result<Campaign, InfraError>;

    /// 全キャンペーンを ID 順で取得する
    async fn find_all(&self) -> Result<Vec<Campaign>, InfraError>;

    /// ID でキャンペーンを検索する
    async fn find_by_id(&self, id: CampaignId) -> Result<Option<Campaign>, InfraError>;

    /// ステータスを更新する
    async fn update_status(
        &self,
        tx: &mut TxContext,
        campaign: &Campaign,
    ) -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct CampaignRow {
    id:          i64,
    name:        String,
    start_date:  Option<NaiveDate>,
    end_date:    Option<NaiveDate>,
    description: Option<String>,
    status:      String,
}

impl TryFrom<CampaignRow> for Campaign {
    type Error = InfraError;

    fn try_from(row: CampaignRow) -> Result<Self, Self::Error> {
        let status = CampaignStatus::from_str(&row.status).map_err(|_| {
            InfraError::unexpected(format!("不明なキャンペーンステータス: {}", row.status))
        })?;

        Ok(Campaign::from_db(
            CampaignId::new(row.id),
            CampaignDetails {
                name:        row.name,
                start_date:  row.start_date,
                end_date:    row.end_date,
                description: row.description,
            },
            status,
        ))
    }
}

/// PostgreSQL 実装の CampaignRepository
#[derive(Debug, Clone)]
pub struct PostgresCampaignRepository {
    pool: PgPool,
}

impl PostgresCampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignRepository for PostgresCampaignRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        tx: &mut TxContext,
        campaign: &NewCampaign,
    ) -> Result<Campaign, InfraError> {
        let details = campaign.details();
        let status: &'static str = campaign.status().into();

        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            INSERT INTO health_check_campaigns (name, start_date, end_date, description, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, start_date, end_date, description, status
            "#,
        )
        .bind(&details.name)
        .bind(details.start_date)
        .bind(details.end_date)
        .bind(details.description.as_deref())
        .bind(status)
        .fetch_one(tx.conn())
        .await?;

        row.try_into()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Campaign>, InfraError> {
        let rows = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT id, name, start_date, end_date, description, status
            FROM health_check_campaigns
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Campaign::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: CampaignId) -> Result<Option<Campaign>, InfraError> {
        let row = sqlx::query_as::<_, CampaignRow>(
            r#"
            SELECT id, name, start_date, end_date, description, status
            FROM health_check_campaigns
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Campaign::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %campaign.id()))]
    async fn update_status(
        &self,
        tx: &mut TxContext,
        campaign: &Campaign,
    ) -> Result<(), InfraError> {
        let status: &'static str = campaign.status().into();

        sqlx::query(
            r#"
            UPDATE health_check_campaigns
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(campaign.id().as_i64())
        .bind(status)
        .execute(tx.conn())
        .await?;

        Ok(())
    }
}
