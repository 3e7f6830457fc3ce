//! # 북마크(Bookmark) 모델 정의
//!
//! 북마크는 (user_id, article_id) 쌍 자체가 전부인 관계 데이터라서
//! 별도의 엔티티 구조체 없이 요청 타입과 처리 결과만 정의합니다.

use serde::Deserialize;

/// `GET/DELETE /bookmarks?user_id=&article_id=` 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct BookmarkQuery {
    pub user_id: Option<String>,
    pub article_id: Option<String>,
}

/// `POST /bookmarks` 요청 본문. ID는 숫자 또는 숫자 문자열입니다.
#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    #[serde(default, deserialize_with = "crate::models::optional_id")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::optional_id")]
    pub article_id: Option<i64>,
}

/// 북마크 추가 결과
///
/// 이미 있는 쌍을 다시 추가해도 에러가 아닙니다.
/// 라우트 핸들러가 이 값으로 201 / 200 응답을 고릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkOutcome {
    Created,
    AlreadyExists,
}
