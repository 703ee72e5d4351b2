//! # Kenshin Core API サーバー
//!
//! 健康診断キャンペーン管理の HTTP サーバーを起動する。
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/kenshin cargo run -p kenshin-core-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use kenshin_core_api::{
    app_builder::build_router,
    config::CoreConfig,
    handler::ReadinessState,
    usecase::HealthCheckUseCaseImpl,
};
use kenshin_domain::clock::SystemClock;
use kenshin_infra::{
    db::{self, PgTransactionManager},
    repository::{
        PostgresCampaignRepository,
        PostgresCheckRequestRepository,
        PostgresCheckResultRepository,
        PostgresEmployeeRepository,
    },
};
use kenshin_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("kenshin-core-api");
    init_tracing(&tracing_config);

    let config = CoreConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        service = %tracing_config.service_name,
        "Core API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    if config.run_migrations {
        db::run_migrations(&pool)
            .await
            .context("マイグレーションの適用に失敗しました")?;
        tracing::info!("マイグレーションを適用しました");
    }

    let usecase = HealthCheckUseCaseImpl::new(
        Arc::new(PostgresEmployeeRepository::new(pool.clone())),
        Arc::new(PostgresCampaignRepository::new(pool.clone())),
        Arc::new(PostgresCheckRequestRepository::new(pool.clone())),
        Arc::new(PostgresCheckResultRepository::new(pool.clone())),
        Arc::new(SystemClock),
        Arc::new(PgTransactionManager::new(pool.clone())),
    );
    let readiness_state = Arc::new(ReadinessState { pool });

    let app = build_router(usecase, readiness_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Core API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
