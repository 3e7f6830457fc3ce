//! # 기사(Article) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/articles?id=1 | `get_articles` | 단일 기사 조회 |
//! | GET | /api/v1/articles?category=&search= | `get_articles` | 기사 목록 (최신순) |
//! | POST | /api/v1/articles | `create_article` | 기사 생성 (이미지 업로드 선택) |
//! | PUT | /api/v1/articles | `update_article` | 기사 부분 수정 |
//! | DELETE | /api/v1/articles?id=1 | `delete_article` | 기사 삭제 |
//!
//! 그 밖의 메서드는 405, OPTIONS는 CORS 레이어가 처리합니다.
//!
//! 본문/쿼리 추출자는 `Result<Json<T>, JsonRejection>` 형태로 받아서
//! 파싱 실패도 `{ "error": ... }` 형식의 400 응답이 되도록 합니다.

use super::{cors_layer, method_not_allowed, non_empty, parse_id, AppState};
use crate::{
    db::{self, ArticleField, SparseUpdate},
    error::AppError,
    models::*,
    services,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection}, // 파싱 실패를 400으로 바꾸기 위해 직접 받음
        DefaultBodyLimit, Query, State,
    },
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

/// `/articles` 경로의 메서드 디스패치 테이블
///
/// 이미지가 base64로 JSON 본문에 들어오므로 Axum 기본 본문 제한(2 MB) 대신
/// `max_body_bytes`를 적용합니다. 넘으면 413으로 응답합니다.
pub fn routes(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/articles",
            get(get_articles)
                .post(create_article)
                .put(update_article)
                .delete(delete_article)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(cors_layer(&[
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
}

/// `GET /articles` — `id`가 있으면 단일 기사, 없으면 조건에 맞는 목록을 반환합니다.
///
/// 응답 타입이 경우에 따라 다르므로(객체 / 배열) `Response`로 통일해 반환합니다.
pub async fn get_articles(
    State(state): State<AppState>,
    query: Result<Query<ArticleQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let mut conn = state.pool.acquire().await?;

    if let Some(id) = parse_id(query.id.as_deref(), "id")? {
        let article = db::get_article(&mut conn, id)
            .await?
            .ok_or_else(AppError::article_not_found)?;
        return Ok(Json(article).into_response());
    }

    let filter = ArticleFilter {
        category: non_empty(query.category),
        search: non_empty(query.search),
    };
    let articles = db::list_articles(&mut conn, &filter).await?;
    Ok(Json(articles).into_response())
}

/// `POST /articles` — 새 기사를 생성합니다.
///
/// 1. title/content/category 필수 검증 (없거나 빈 값이면 400)
/// 2. image가 있으면 먼저 오브젝트 저장소에 업로드하고 URL을 받음
/// 3. 트랜잭션 안에서 INSERT 후 커밋
///
/// 성공 시 `201 Created`와 생성된 기사를 반환합니다.
pub async fn create_article(
    State(state): State<AppState>,
    body: Result<Json<CreateArticleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Article>), AppError> {
    let Json(req) = body?;

    let (Some(title), Some(content), Some(category)) = (
        non_empty(req.title),
        non_empty(req.content),
        non_empty(req.category),
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let image_url = match non_empty(req.image) {
        Some(image) => Some(
            services::upload_image(state.storage.as_ref(), &image, req.filename.as_deref())
                .await?,
        ),
        None => None,
    };

    let new_article = NewArticle {
        title,
        content,
        category,
        tags: req.tags.unwrap_or_default(),
        image_url,
    };

    let mut tx = state.pool.begin().await?;
    let article = db::create_article(&mut tx, &new_article).await?;
    tx.commit().await?;

    tracing::info!(article_id = article.id, "Article created");
    Ok((StatusCode::CREATED, Json(article)))
}

/// `PUT /articles` — 본문에 들어온 필드만 수정합니다.
///
/// id는 본문의 `id`를 쓰고, 없으면 `?id=` 쿼리 파라미터를 봅니다.
/// 바꿀 필드가 하나도 없어도 `updated_at`은 갱신됩니다.
pub async fn update_article(
    State(state): State<AppState>,
    query: Result<Query<ArticleQuery>, QueryRejection>,
    body: Result<Json<UpdateArticleRequest>, JsonRejection>,
) -> Result<Json<Article>, AppError> {
    let Query(query) = query?;
    let Json(req) = body?;

    let id = match req.id {
        Some(id) => Some(id),
        None => parse_id(query.id.as_deref(), "id")?,
    }
    .ok_or_else(|| AppError::BadRequest("Article ID is required".to_string()))?;

    let mut update = SparseUpdate::new();
    if let Some(title) = req.title {
        update.set(ArticleField::Title, title);
    }
    if let Some(content) = req.content {
        update.set(ArticleField::Content, content);
    }
    if let Some(category) = req.category {
        update.set(ArticleField::Category, category);
    }
    if let Some(tags) = &req.tags {
        update.set_tags(tags)?;
    }
    if let Some(image) = non_empty(req.image) {
        let url =
            services::upload_image(state.storage.as_ref(), &image, req.filename.as_deref()).await?;
        update.set(ArticleField::ImageUrl, url);
    }

    if update.is_empty() {
        tracing::debug!(article_id = id, "No fields to update, refreshing updated_at only");
    }

    let mut tx = state.pool.begin().await?;
    let article = db::update_article(&mut tx, id, &update)
        .await?
        .ok_or_else(AppError::article_not_found)?;
    tx.commit().await?;

    let fields: Vec<&str> = update.fields().map(ArticleField::column).collect();
    tracing::info!(article_id = id, ?fields, "Article updated");
    Ok(Json(article))
}

/// `DELETE /articles?id=1` — 기사를 삭제합니다.
///
/// 없는 id면 404를 반환하고 트랜잭션은 커밋되지 않은 채 롤백됩니다.
pub async fn delete_article(
    State(state): State<AppState>,
    query: Result<Query<ArticleQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let id = parse_id(query.id.as_deref(), "id")?
        .ok_or_else(|| AppError::BadRequest("Article ID is required".to_string()))?;

    let mut tx = state.pool.begin().await?;
    if !db::delete_article(&mut tx, id).await? {
        return Err(AppError::article_not_found());
    }
    tx.commit().await?;

    tracing::info!(article_id = id, "Article deleted");
    Ok(Json(json!({ "message": "Article deleted successfully" })))
}
