//! CheckResultRepository 統合テスト

mod common;

use common::{date, insert_employee};
use kenshin_domain::check_result::NewCheckResult;
use kenshin_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{CheckResultRepository, PostgresCheckResultRepository},
};
use pretty_assertions::assert_eq;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn test_insertとfind_by_employee_受診日の新しい順(pool: PgPool) {
    let employee_id = insert_employee(&pool, "Lan", None).await;
    let other_id = insert_employee(&pool, "Minh", None).await;
    let sut = PostgresCheckResultRepository::new(pool.clone());
    let tx_manager = PgTransactionManager::new(pool.clone());

    let mut tx = tx_manager.begin().await.unwrap();
    let older = sut
        .insert(
            &mut tx,
            &NewCheckResult::unlinked(
                employee_id,
                date(2025, 1, 1),
                "Type 2".to_string(),
                "要経過観察".to_string(),
            ),
        )
        .await
        .unwrap();
    let newer = sut
        .insert(
            &mut tx,
            &NewCheckResult::unlinked(
                employee_id,
                date(2026, 2, 6),
                "Type 1".to_string(),
                "Good".to_string(),
            ),
        )
        .await
        .unwrap();
    sut.insert(
        &mut tx,
        &NewCheckResult::unlinked(
            other_id,
            date(2026, 2, 6),
            "Type 1".to_string(),
            "Good".to_string(),
        ),
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(newer.request_id(), None);
    assert_eq!(
        sut.find_by_employee(employee_id).await.unwrap(),
        vec![newer, older]
    );
}
