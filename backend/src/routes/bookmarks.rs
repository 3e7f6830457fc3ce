//! # 북마크(Bookmark) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET | /api/v1/bookmarks?user_id=1 | 사용자가 북마크한 기사 ID 배열 |
//! | POST | /api/v1/bookmarks + `{ "user_id": 1, "article_id": 2 }` | 북마크 추가 (중복이면 200) |
//! | DELETE | /api/v1/bookmarks?user_id=1&article_id=2 | 북마크 삭제 (없어도 200) |
//!
//! PUT 등 그 밖의 메서드는 405를 반환합니다.

use super::{cors_layer, method_not_allowed, parse_id, AppState};
use crate::{db, error::AppError, models::*};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{Method, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// `/bookmarks` 경로의 메서드 디스패치 테이블
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookmarks",
            get(list_bookmarks)
                .post(add_bookmark)
                .delete(remove_bookmark)
                .fallback(method_not_allowed),
        )
        .layer(cors_layer(&[
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
}

fn ids_required() -> AppError {
    AppError::BadRequest("user_id and article_id are required".to_string())
}

/// `GET /bookmarks?user_id=1` → `[3, 7, ...]`
pub async fn list_bookmarks(
    State(state): State<AppState>,
    query: Result<Query<BookmarkQuery>, QueryRejection>,
) -> Result<Json<Vec<i64>>, AppError> {
    let Query(query) = query?;
    let user_id = parse_id(query.user_id.as_deref(), "user_id")?
        .ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))?;

    let mut conn = state.pool.acquire().await?;
    let article_ids = db::list_bookmarked_article_ids(&mut conn, user_id).await?;
    Ok(Json(article_ids))
}

/// `POST /bookmarks` — 북마크를 추가합니다.
///
/// 같은 쌍을 다시 추가하면 에러 대신 200과 안내 메시지를 반환합니다 (멱등성).
/// - 새로 추가: `201 { "success": true }`
/// - 이미 있음: `200 { "success": true, "message": "Already bookmarked" }`
pub async fn add_bookmark(
    State(state): State<AppState>,
    body: Result<Json<BookmarkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(req) = body?;
    let (Some(user_id), Some(article_id)) = (req.user_id, req.article_id) else {
        return Err(ids_required());
    };

    let mut tx = state.pool.begin().await?;
    let outcome = db::add_bookmark(&mut tx, user_id, article_id).await?;
    tx.commit().await?;

    match outcome {
        BookmarkOutcome::Created => {
            tracing::info!(user_id, article_id, "Bookmark added");
            Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
        }
        BookmarkOutcome::AlreadyExists => Ok((
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Already bookmarked" })),
        )),
    }
}

/// `DELETE /bookmarks?user_id=1&article_id=2` — 북마크를 삭제합니다.
///
/// 원래 없던 쌍이어도 성공으로 응답합니다.
pub async fn remove_bookmark(
    State(state): State<AppState>,
    query: Result<Query<BookmarkQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let (Some(user_id), Some(article_id)) = (
        parse_id(query.user_id.as_deref(), "user_id")?,
        parse_id(query.article_id.as_deref(), "article_id")?,
    ) else {
        return Err(ids_required());
    };

    let mut tx = state.pool.begin().await?;
    let removed = db::remove_bookmark(&mut tx, user_id, article_id).await?;
    tx.commit().await?;

    tracing::info!(user_id, article_id, removed, "Bookmark removed");
    Ok(Json(json!({ "success": true })))
}
