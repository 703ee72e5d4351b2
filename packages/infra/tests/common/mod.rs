//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するシードデータ投入ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::NaiveDate;
use kenshin_domain::{
    campaign::{Campaign, CampaignDetails, NewCampaign},
    employee::EmployeeId,
};
use kenshin_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{CampaignRepository, PostgresCampaignRepository},
};
use sqlx::PgPool;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 従業員を直接 INSERT する（従業員の登録はリポジトリの責務外）
pub async fn insert_employee(
    pool: &PgPool,
    first_name: &str,
    last_health_check_date: Option<NaiveDate>,
) -> EmployeeId {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO employees (first_name, last_name, email, department, last_health_check_date)
        VALUES ($1, 'Tanaka', NULL, '総務部', $2)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_health_check_date)
    .fetch_one(pool)
    .await
    .unwrap();

    EmployeeId::new(id)
}

/// PLANNING のキャンペーンを作成する
pub async fn insert_campaign(pool: &PgPool, name: &str) -> Campaign {
    let tx_manager = PgTransactionManager::new(pool.clone());
    let repo = PostgresCampaignRepository::new(pool.clone());

    let mut tx = tx_manager.begin().await.unwrap();
    let campaign = repo
        .insert(
            &mut tx,
            &NewCampaign::new(CampaignDetails {
                name:        name.to_string(),
                start_date:  Some(date(2026, 3, 1)),
                end_date:    Some(date(2026, 3, 31)),
                description: None,
            }),
        )
        .await
        .unwrap();
    tx.commit().await.unwrap();

    campaign
}
