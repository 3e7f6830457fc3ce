//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok", "database": "ok" }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터가 서버 상태를 확인할 때 사용합니다.
//! DB 커넥션을 하나 빌려 `SELECT 1`을 실행해 보고, 실패하면 503을 반환합니다.

use super::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 데이터베이스 상태를 확인합니다.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "ok" })),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "database": err.to_string() })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_health_ok() {
        let app = app().await;

        let res = send(&app, Method::GET, "/health", None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body, json!({ "status": "ok", "database": "ok" }));
    }
}
