//! # 부분 업데이트(Sparse Update) 쿼리 빌더
//!
//! PUT 요청에 들어온 필드만으로 `UPDATE articles SET ...` 문을 조립합니다.
//!
//! - 갱신 가능한 컬럼은 `ArticleField` 열거형에 있는 것뿐입니다.
//!   컬럼 이름을 문자열로 받지 않으므로 SQL에 임의의 식별자가 들어갈 수 없습니다.
//! - 값은 항상 `?` 자리표시자로 바인딩합니다.
//! - `updated_at`은 빌더가 직접 갱신합니다.
//!
//! ```text
//! UPDATE articles SET title = ?, tags = ?, updated_at = strftime(...) WHERE id = ? RETURNING ...
//!                      ^^^^^^^^^^^^^^^^^^  호출 순서대로       항상 마지막  ^^^^^^^^^^^^^^
//! ```

use super::{articles::ARTICLE_COLUMNS, NOW_UTC};
use crate::error::AppError;

/// `articles` 테이블에서 PUT으로 바꿀 수 있는 컬럼 목록 (화이트리스트)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Content,
    Category,
    Tags,
    ImageUrl,
}

impl ArticleField {
    /// SQL에 들어갈 실제 컬럼 이름
    pub fn column(self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Content => "content",
            ArticleField::Category => "category",
            ArticleField::Tags => "tags",
            ArticleField::ImageUrl => "image_url",
        }
    }
}

/// 부분 업데이트 빌더
///
/// 모든 값은 문자열로 바인딩됩니다. tags는 JSON 배열 문자열로 변환해 둡니다.
#[derive(Debug, Default, Clone)]
pub struct SparseUpdate {
    assignments: Vec<(ArticleField, String)>,
}

impl SparseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 값을 지정합니다.
    ///
    /// 같은 필드를 다시 지정하면 값만 바뀌고 SET 절에서의 위치는 처음 그대로입니다.
    pub fn set(&mut self, field: ArticleField, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.assignments.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.assignments.push((field, value)),
        }
        self
    }

    /// tags 배열을 JSON 문자열로 직렬화해 지정합니다.
    pub fn set_tags(&mut self, tags: &[String]) -> Result<&mut Self, AppError> {
        let encoded = serde_json::to_string(tags)?;
        Ok(self.set(ArticleField::Tags, encoded))
    }

    /// 지정된 필드를 SET 절 순서대로 돌려줍니다.
    pub fn fields(&self) -> impl Iterator<Item = ArticleField> + '_ {
        self.assignments.iter().map(|(field, _)| *field)
    }

    /// 지정된 필드가 하나도 없으면 true (이때도 updated_at은 갱신됩니다)
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// 완성된 SQL 문자열
    ///
    /// 자리표시자 순서: 지정한 필드 값들 → 마지막에 id
    pub fn to_sql(&self) -> String {
        let mut sets: Vec<String> = self
            .assignments
            .iter()
            .map(|(field, _)| format!("{} = ?", field.column()))
            .collect();
        sets.push(format!("updated_at = {NOW_UTC}"));

        format!(
            "UPDATE articles SET {} WHERE id = ? RETURNING {ARTICLE_COLUMNS}",
            sets.join(", ")
        )
    }

    /// id를 제외한 바인딩 값들 (SET 절 순서)
    pub fn bindings(&self) -> impl Iterator<Item = &str> + '_ {
        self.assignments.iter().map(|(_, value)| value.as_str())
    }
}
