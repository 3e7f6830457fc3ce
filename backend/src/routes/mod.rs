//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! 경로 하나에 HTTP 메서드별 핸들러를 매달아 두는 "메서드 디스패치 테이블" 구조입니다.
//!
//! 각 하위 모듈:
//! - `articles`: `/articles` — 기사 조회/생성/수정/삭제
//! - `bookmarks`: `/bookmarks` — 북마크 목록/추가/삭제
//! - `health`: `/health` — 서버 상태 확인 (헬스체크)
//!
//! ## 요청 하나 = 커넥션 하나
//! 핸들러는 요청마다 풀에서 커넥션을 하나 빌립니다.
//! - 조회: `pool.acquire()` → `PoolConnection`
//! - 변경: `pool.begin()` → `Transaction`
//!
//! 두 가드 모두 스코프를 벗어나면(drop) 커넥션을 풀에 돌려줍니다.
//! 트랜잭션은 `commit()` 없이 drop 되면 자동으로 롤백되므로,
//! `?`로 중간에 빠져나가는 모든 에러 경로에서 부분 변경이 남지 않습니다.

pub mod articles;
pub mod bookmarks;
pub mod health;

use crate::{error::AppError, services::ObjectStore};
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// `SqlitePool`과 `Arc`는 clone해도 내부 자원이 복제되지 않고 같은 대상을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀 (요청마다 커넥션 하나를 빌려 씀)
    pub pool: SqlitePool,
    /// 이미지 업로드에 쓰는 오브젝트 저장소
    pub storage: Arc<dyn ObjectStore>,
    /// `/articles` 요청 본문 최대 바이트 수
    pub max_body_bytes: usize,
}

/// API 라우터를 만듭니다. `main`에서 `/api/v1` 아래에 중첩(nest)됩니다.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(articles::routes(state.max_body_bytes))
        .merge(bookmarks::routes())
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// 경로별 CORS 레이어
///
/// - `Access-Control-Allow-Origin: *`은 에러 응답을 포함한 모든 응답에 붙습니다.
/// - OPTIONS 요청(preflight)은 핸들러까지 가지 않고 이 레이어가 200으로 바로 응답합니다.
pub(crate) fn cors_layer(methods: &[Method]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods.to_vec())
        .allow_headers([header::CONTENT_TYPE])
}

/// 경로는 맞지만 메서드가 등록되지 않은 요청에 대한 응답 (405)
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// 쿼리 파라미터로 들어온 정수 ID를 파싱합니다.
///
/// - 없거나 빈 문자열 → `Ok(None)`
/// - 정수가 아님 → 400
pub(crate) fn parse_id(value: Option<&str>, name: &str) -> Result<Option<i64>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{name} must be an integer"))),
    }
}

/// 공백뿐인 문자열을 None으로 정리합니다.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
