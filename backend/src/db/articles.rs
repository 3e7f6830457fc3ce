//! # 기사 데이터베이스 쿼리 모듈
//!
//! `articles` 테이블에 대한 CRUD(Create, Read, Update, Delete) 쿼리 함수들입니다.
//!
//! 모든 함수는 풀(pool)이 아니라 `&mut SqliteConnection`을 받습니다.
//! 라우트 핸들러가 요청마다 커넥션(또는 트랜잭션)을 하나 잡고,
//! 같은 커넥션으로 쿼리를 실행한 뒤 커밋/롤백하기 때문입니다.
//! `Transaction`과 `PoolConnection`은 둘 다 `SqliteConnection`으로 deref 됩니다.

use super::sparse_update::SparseUpdate;
use crate::error::AppError;
use crate::models::*;
use sqlx::SqliteConnection;

/// SELECT/RETURNING에 쓰는 컬럼 목록 (`Article` 필드 순서와 동일)
pub(crate) const ARTICLE_COLUMNS: &str =
    "id, title, content, category, tags, image_url, created_at, updated_at";

/// 기사 목록을 조회합니다.
///
/// 조건은 있는 것만 AND로 붙입니다. 결과는 최신 생성순이고,
/// 같은 밀리초에 만들어진 기사는 id가 큰 쪽이 먼저입니다.
///
/// ## 검색어(search) 처리
/// - 제목/본문: `LIKE '%검색어%'` 부분 일치. SQLite의 LIKE는 ASCII 대소문자를 구분하지 않습니다.
/// - 태그: `json_each()`로 JSON 배열을 펼쳐 정확히 일치하는 원소가 있는지 확인합니다.
/// - 검색어 안의 `%`, `_`는 와일드카드가 아니라 글자 그대로 찾도록 이스케이프합니다.
pub async fn list_articles(
    conn: &mut SqliteConnection,
    filter: &ArticleFilter,
) -> Result<Vec<Article>, AppError> {
    let mut query = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE 1 = 1");
    let mut bindings: Vec<String> = Vec::new();

    if let Some(category) = &filter.category {
        query.push_str(" AND category = ?");
        bindings.push(category.clone());
    }

    if let Some(search) = &filter.search {
        query.push_str(
            r#" AND (title LIKE ? ESCAPE '\'
                 OR content LIKE ? ESCAPE '\'
                 OR EXISTS (SELECT 1 FROM json_each(articles.tags) WHERE json_each.value = ?))"#,
        );
        let pattern = format!("%{}%", escape_like(search));
        bindings.push(pattern.clone());
        bindings.push(pattern);
        bindings.push(search.clone());
    }

    query.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query_builder = sqlx::query_as::<_, Article>(&query);
    for binding in bindings {
        query_builder = query_builder.bind(binding);
    }

    let articles = query_builder.fetch_all(&mut *conn).await?;
    Ok(articles)
}

/// ID로 기사 하나를 조회합니다.
///
/// - `Ok(Some(Article))`: 찾은 경우
/// - `Ok(None)`: 해당 ID가 없는 경우 (핸들러에서 404로 변환)
pub async fn get_article(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Article>, AppError> {
    let article = sqlx::query_as::<_, Article>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(article)
}

/// 새 기사를 삽입하고, DB가 채운 id와 시각까지 포함된 행을 반환합니다.
///
/// `RETURNING`으로 삽입과 조회를 한 문장에 처리합니다.
pub async fn create_article(
    conn: &mut SqliteConnection,
    article: &NewArticle,
) -> Result<Article, AppError> {
    let tags = serde_json::to_string(&article.tags)?;

    let created = sqlx::query_as::<_, Article>(&format!(
        r#"
        INSERT INTO articles (title, content, category, tags, image_url)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {ARTICLE_COLUMNS}
        "#
    ))
    .bind(&article.title)
    .bind(&article.content)
    .bind(&article.category)
    .bind(tags)
    .bind(&article.image_url) // None이면 SQL NULL
    .fetch_one(&mut *conn)
    .await?;

    Ok(created)
}

/// 기사를 부분 업데이트합니다.
///
/// SQL은 `SparseUpdate`가 만들고, 여기서는 값 바인딩과 실행만 합니다.
/// 매칭되는 행이 없으면 `RETURNING` 결과가 비어 `Ok(None)`이 됩니다.
pub async fn update_article(
    conn: &mut SqliteConnection,
    id: i64,
    update: &SparseUpdate,
) -> Result<Option<Article>, AppError> {
    let sql = update.to_sql();

    let mut query_builder = sqlx::query_as::<_, Article>(&sql);
    for binding in update.bindings() {
        query_builder = query_builder.bind(binding);
    }

    let article = query_builder.bind(id).fetch_optional(&mut *conn).await?;
    Ok(article)
}

/// 기사를 삭제합니다.
///
/// - `Ok(true)`: 삭제됨
/// - `Ok(false)`: 해당 ID가 없음
///
/// 이 기사를 가리키는 북마크는 `ON DELETE CASCADE`로 함께 지워집니다.
pub async fn delete_article(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// LIKE 패턴의 특수문자(`\`, `%`, `_`)를 `\`로 이스케이프합니다.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{sparse_update::ArticleField, test_pool};
    use std::time::Duration;

    fn new_article(title: &str, category: &str, tags: &[&str]) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            content: format!("{title} body"),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image_url: None,
        }
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let article = create_article(&mut conn, &new_article("Stop", "traffic", &["car"]))
            .await
            .unwrap();

        assert!(article.id > 0);
        assert_eq!(article.tags, vec!["car".to_string()]);
        assert_eq!(article.image_url, None);
        assert_eq!(article.created_at, article.updated_at);

        let fetched = get_article(&mut conn, article.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Stop");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        assert!(get_article(&mut conn, 9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_category_newest_first() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = create_article(&mut conn, &new_article("A", "traffic", &[])).await.unwrap();
        create_article(&mut conn, &new_article("B", "criminal", &[])).await.unwrap();
        let third = create_article(&mut conn, &new_article("C", "traffic", &[])).await.unwrap();

        let filter = ArticleFilter {
            category: Some("traffic".to_string()),
            search: None,
        };
        let ids: Vec<i64> = list_articles(&mut conn, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();

        assert_eq!(ids, vec![third.id, first.id]);
    }

    #[tokio::test]
    async fn test_search_matches_text_case_insensitively_and_tags_exactly() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let by_title = create_article(&mut conn, &new_article("Vehicle Search", "a", &[])).await.unwrap();
        let by_tag = create_article(&mut conn, &new_article("Other", "a", &["vehicle"])).await.unwrap();
        create_article(&mut conn, &new_article("Unrelated", "a", &["vehicles"])).await.unwrap();

        let filter = ArticleFilter {
            category: None,
            search: Some("VEHICLE".to_string()),
        };
        let found: Vec<i64> = list_articles(&mut conn, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(found, vec![by_title.id]);

        let filter = ArticleFilter {
            category: None,
            search: Some("vehicle".to_string()),
        };
        let found: Vec<i64> = list_articles(&mut conn, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(found, vec![by_tag.id, by_title.id]);
    }

    #[tokio::test]
    async fn test_search_percent_is_literal() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        create_article(&mut conn, &new_article("Fines", "a", &[])).await.unwrap();
        let literal = create_article(&mut conn, &new_article("100% sure", "a", &[])).await.unwrap();

        let filter = ArticleFilter {
            category: None,
            search: Some("%".to_string()),
        };
        let found = list_articles(&mut conn, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, literal.id);
    }

    #[tokio::test]
    async fn test_sparse_update_changes_only_given_fields() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let original = create_article(&mut conn, &new_article("Old", "traffic", &["x"]))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let mut update = SparseUpdate::new();
        update.set(ArticleField::Title, "New");
        let updated = update_article(&mut conn, original.id, &update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.content, original.content);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.tags, original.tags);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let mut update = SparseUpdate::new();
        update.set_tags(&["a".to_string()]).unwrap();
        assert!(update_article(&mut conn, 42, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let article = create_article(&mut conn, &new_article("Gone", "a", &[])).await.unwrap();
        assert!(delete_article(&mut conn, article.id).await.unwrap());
        assert!(!delete_article(&mut conn, article.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back_whole_transaction() {
        let pool = test_pool().await;
        sqlx::query(
            "CREATE TRIGGER reject_updates BEFORE UPDATE ON articles \
             BEGIN SELECT RAISE(ABORT, 'updates disabled'); END",
        )
        .execute(&pool)
        .await
        .unwrap();

        {
            let mut tx = pool.begin().await.unwrap();
            let article = create_article(&mut tx, &new_article("Draft", "traffic", &[]))
                .await
                .unwrap();

            let mut update = SparseUpdate::new();
            update.set(ArticleField::Title, "Final");
            let err = update_article(&mut tx, article.id, &update).await.unwrap_err();
            assert!(err.to_string().contains("updates disabled"));
            // 커밋 없이 tx가 drop 되면서 INSERT까지 롤백됩니다.
        }

        let mut conn = pool.acquire().await.unwrap();
        let rows = list_articles(&mut conn, &ArticleFilter::default()).await.unwrap();
        assert!(rows.is_empty());
    }
}
