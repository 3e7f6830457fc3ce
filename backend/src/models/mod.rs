//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `article`: 기사(Article)와 조회/생성/수정 요청 구조체
//! - `bookmark`: 북마크 요청 구조체와 추가 결과
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Article`처럼 짧게 접근합니다.
//!
//! 요청 본문의 ID 필드는 숫자(`5`)와 숫자 문자열(`"5"`)을 모두 받습니다.

pub mod article;
pub mod bookmark;

pub use article::*;
pub use bookmark::*;

use serde::{de, Deserialize, Deserializer};

/// 요청 본문에 들어올 수 있는 ID 표현
#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Int(i64),
    Text(String),
}

/// `#[serde(default, deserialize_with = "crate::models::optional_id")]`
///
/// - `5`, `"5"`, `" 5 "` → `Some(5)`
/// - `null`, `""` → `None` (필드 누락과 같은 취급)
/// - 그 밖의 문자열 → 역직렬화 에러 (핸들러에서 400)
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdValue::Int(id)) => Ok(Some(id)),
        Some(IdValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid id: {text:?}")))
        }
    }
}
