//! # 기사(Article) 모델 정의
//!
//! ## 구조체 역할
//! - `Article`: `articles` 테이블 한 행(row). 응답 본문으로 그대로 직렬화됩니다.
//! - `ArticleQuery`: `GET/DELETE /articles`의 URL 쿼리 파라미터
//! - `ArticleFilter`: 검증을 마친 목록 조회 조건 (DB 계층으로 전달)
//! - `CreateArticleRequest` / `UpdateArticleRequest`: POST / PUT 요청 본문
//! - `NewArticle`: 필수 필드 검증을 통과한 삽입용 데이터

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 기사 엔티티 — DB의 `articles` 테이블 한 행에 대응합니다.
///
/// `#[sqlx(json)]`: tags 컬럼은 JSON 배열 문자열(TEXT)로 저장되어 있으므로,
/// 읽을 때 `Vec<String>`으로 역직렬화하도록 sqlx에 알려줍니다.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `?id=&category=&search=` 쿼리 파라미터
///
/// id를 숫자가 아닌 문자열로 받는 이유: `?id=abc` 같은 값도 추출 단계에서
/// 거부하지 않고, 핸들러가 직접 400 응답(JSON)을 만들기 위해서입니다.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleQuery {
    pub id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// 목록 조회 조건. 빈 문자열은 조건 없음(None)으로 정리된 상태입니다.
#[derive(Debug, Default, Clone)]
pub struct ArticleFilter {
    /// 카테고리 정확히 일치
    pub category: Option<String>,
    /// 제목/본문 부분 일치(대소문자 무시) 또는 태그 정확히 일치
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    /// base64 이미지 (또는 `data:image/png;base64,...` 형태의 data URL)
    pub image: Option<String>,
    /// 업로드 파일 이름. 없으면 "image.jpg"
    pub filename: Option<String>,
}

/// PUT 요청 본문 — 들어온 필드만 갱신합니다 (부분 업데이트).
/// 누락된 필드와 null 필드는 모두 "변경 안 함"으로 취급합니다.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    /// 숫자 또는 숫자 문자열. 없으면 `?id=` 쿼리 파라미터를 봅니다.
    #[serde(default, deserialize_with = "crate::models::optional_id")]
    pub id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
    pub filename: Option<String>,
}

/// 검증을 통과한 새 기사 데이터
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}
