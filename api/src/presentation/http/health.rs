use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use crate::infrastructure::cache::RedisSessionStore;

#[derive(Clone)]
pub struct HealthState {
    pub pool: PgPool,
    pub sessions: RedisSessionStore,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResp {
    pub status: &'static str,
    pub database: bool,
    pub cache: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, body = HealthResp))
)]
pub async fn health(State(state): State<HealthState>) -> Json<HealthResp> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    let cache = state.sessions.ping().await.is_ok();
    let status = if database && cache { "ok" } else { "degraded" };
    Json(HealthResp {
        status,
        database,
        cache,
    })
}

pub fn routes(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}
