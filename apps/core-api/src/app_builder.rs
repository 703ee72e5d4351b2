//! # アプリケーション構築
//!
//! State の注入、ルーター定義、共通ミドルウェアの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## ミドルウェア（外側から順に）
//!
//! 1. `SetRequestIdLayer`: `X-Request-Id` がなければ UUID v7 を付与
//! 2. `TraceLayer`: リクエストごとのスパン（Request ID 付き）
//! 3. `PropagateRequestIdLayer`: レスポンスに `X-Request-Id` を返す
//! 4. `CorsLayer`: 任意のオリジンからのクロスオリジンリクエストを許可

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use kenshin_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        HealthCheckState,
        ReadinessState,
        create_campaign,
        enroll_employees,
        get_campaign,
        health_check,
        list_campaign_requests,
        list_campaigns,
        list_due_employees,
        list_employee_results,
        list_requests_by_status,
        mark_campaign_sent,
        readiness_check,
        record_result,
    },
    usecase::HealthCheckUseCaseImpl,
};

/// 業務 API の共通プレフィックス
pub const API_PREFIX: &str = "/api/hrm/health-check";

/// ルーターを構築する
pub fn build_router(
    usecase: HealthCheckUseCaseImpl,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    let health_check_state = Arc::new(HealthCheckState { usecase });

    let api = Router::new()
        .route("/campaigns", post(create_campaign).get(list_campaigns))
        .route("/campaigns/{id}", get(get_campaign))
        .route("/campaigns/{id}/add-employees", post(enroll_employees))
        .route("/campaigns/{id}/sync-to-his", post(mark_campaign_sent))
        .route("/campaigns/{id}/requests", get(list_campaign_requests))
        .route("/requests", get(list_requests_by_status))
        .route("/due-employees", get(list_due_employees))
        .route("/employees/{id}/results", get(list_employee_results))
        .route("/results", post(record_result))
        .with_state(health_check_state);

    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .nest(API_PREFIX, api)
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
